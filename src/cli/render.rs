//! Tree rendering of a field forest

use colored::Colorize;
use termtree::Tree;

use crate::cli::output::kind_label;
use crate::domain::Field;

/// Build a printable tree with a synthetic `schema` root.
pub fn field_tree(fields: &[Field]) -> Tree<String> {
    Tree::new("schema".bold().to_string()).with_leaves(fields.iter().map(field_node))
}

fn field_node(field: &Field) -> Tree<String> {
    Tree::new(field_label(field)).with_leaves(field.children().iter().map(field_node))
}

/// `name: Kind = default [id]`; unnamed fields show as `<unnamed>`.
pub fn field_label(field: &Field) -> String {
    let name = if field.name.is_empty() {
        "<unnamed>".dimmed().to_string()
    } else {
        field.name.clone()
    };
    let default = field
        .default_value
        .as_ref()
        .map(|v| format!(" = {}", v))
        .unwrap_or_default();
    format!(
        "{}: {}{} {}",
        name,
        kind_label(field.kind),
        default,
        format!("[{}]", field.id).dimmed()
    )
}
