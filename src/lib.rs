//! rschema: build nested schema field trees and derive a JSON document from them.
//!
//! The [`domain`] layer holds the field model and the pure tree operations,
//! [`application`] projects trees into documents and drives editing
//! sessions, [`cli`] is the terminal front end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
