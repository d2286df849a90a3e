//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services hold the caller's state (the current field tree) and are
//! concrete structs, not traits.

mod editor;
mod session;

pub use editor::{EditOutcome, EditorOptions, SchemaEditor};
pub use session::{Reply, ScriptSession};
