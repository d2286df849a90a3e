//! Application layer: schema projection, editing services and scripts
//!
//! This layer orchestrates the pure domain operations on behalf of a front end.

pub mod convert;
pub mod error;
pub mod error_ext;
pub mod script;
pub mod services;

pub use convert::{convert, project, render_pretty, to_json_schema, SchemaFormat};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
