//! Domain layer: field model and tree operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod field;
pub mod id;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use field::{DefaultValue, Field, FieldKind, FieldUpdate, KindCategory};
pub use id::{FieldId, IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use tree::{
    add_field_to_parent, count_fields, create_default_field, create_default_field_with,
    find_field_by_id, iter_fields, max_depth, parent_of, remove_field_from_array,
    update_field_in_array, FieldIter,
};
