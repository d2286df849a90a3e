//! Field forest operations
//!
//! A schema is an ordered list of root fields, each possibly holding nested
//! fields. Every operation here is pure: it borrows the forest and returns a
//! new one, leaving the input untouched. Traversals are depth-first,
//! pre-order, children in list order.

use tracing::instrument;

use crate::domain::field::{Field, FieldKind, FieldUpdate};
use crate::domain::id::{FieldId, IdGenerator, RandomIdGenerator};

/// Create a field of `kind` with a fresh random id.
pub fn create_default_field(kind: FieldKind) -> Field {
    create_default_field_with(&RandomIdGenerator, kind)
}

/// Create a field of `kind` with an id from `ids`.
pub fn create_default_field_with(ids: &dyn IdGenerator, kind: FieldKind) -> Field {
    Field::new(ids.next_id(), kind)
}

/// Find the first field with `id`, searching depth-first.
#[instrument(level = "trace", skip(tree))]
pub fn find_field_by_id<'a>(tree: &'a [Field], id: &FieldId) -> Option<&'a Field> {
    iter_fields(tree)
        .find(|(_, field)| field.id == *id)
        .map(|(_, field)| field)
}

/// Merge `update` onto the first field with `id`.
///
/// Only the first match in traversal order is updated; any (incorrect)
/// duplicates further on are left as they are. Unknown ids yield a copy of
/// the input.
#[instrument(level = "trace", skip(tree, update))]
pub fn update_field_in_array(tree: &[Field], id: &FieldId, update: &FieldUpdate) -> Vec<Field> {
    let mut applied = false;
    update_in(tree, id, update, &mut applied)
}

fn update_in(fields: &[Field], id: &FieldId, update: &FieldUpdate, applied: &mut bool) -> Vec<Field> {
    fields
        .iter()
        .map(|field| {
            if !*applied && field.id == *id {
                *applied = true;
                return update.apply_to(field);
            }
            rebuild(field, |children| update_in(children, id, update, applied))
        })
        .collect()
}

/// Drop every field with `id`, together with its subtree.
#[instrument(level = "trace", skip(tree))]
pub fn remove_field_from_array(tree: &[Field], id: &FieldId) -> Vec<Field> {
    tree.iter()
        .filter(|field| field.id != *id)
        .map(|field| rebuild(field, |children| remove_field_from_array(children, id)))
        .collect()
}

/// Append `new_field` to the children of the container with `parent_id`.
///
/// Scalar fields never receive children, even when their id matches. Only
/// the first matching container is extended so the new field is never
/// duplicated.
#[instrument(level = "trace", skip(tree, new_field), fields(new_id = %new_field.id))]
pub fn add_field_to_parent(tree: &[Field], parent_id: &FieldId, new_field: &Field) -> Vec<Field> {
    let mut added = false;
    add_in(tree, parent_id, new_field, &mut added)
}

fn add_in(fields: &[Field], parent_id: &FieldId, new_field: &Field, added: &mut bool) -> Vec<Field> {
    fields
        .iter()
        .map(|field| {
            if !*added && field.id == *parent_id && field.is_container() {
                *added = true;
                let mut children = field.children().to_vec();
                children.push(new_field.clone());
                let mut parent = shallow(field);
                parent.children = Some(children);
                return parent;
            }
            rebuild(field, |children| add_in(children, parent_id, new_field, added))
        })
        .collect()
}

/// Copy of `field` whose children (if any) are replaced by `f(children)`.
fn rebuild(field: &Field, f: impl FnOnce(&[Field]) -> Vec<Field>) -> Field {
    let mut copy = shallow(field);
    copy.children = field.children.as_deref().map(f);
    copy
}

fn shallow(field: &Field) -> Field {
    Field {
        id: field.id.clone(),
        name: field.name.clone(),
        kind: field.kind,
        children: None,
        default_value: field.default_value.clone(),
    }
}

/// Depth-first pre-order iterator over a forest.
///
/// Yields `(depth, field)`, roots at depth 0.
pub fn iter_fields(tree: &[Field]) -> FieldIter<'_> {
    FieldIter::new(tree)
}

pub struct FieldIter<'a> {
    stack: Vec<(usize, &'a Field)>,
}

impl<'a> FieldIter<'a> {
    fn new(tree: &'a [Field]) -> Self {
        let stack = tree.iter().rev().map(|f| (0, f)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = (usize, &'a Field);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, field) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in field.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, field))
    }
}

/// Total number of fields in the forest.
pub fn count_fields(tree: &[Field]) -> usize {
    iter_fields(tree).count()
}

/// Number of levels in the forest; 0 when empty.
pub fn max_depth(tree: &[Field]) -> usize {
    iter_fields(tree).map(|(d, _)| d + 1).max().unwrap_or(0)
}

/// The field whose children contain `id`; `None` for roots and unknown ids.
pub fn parent_of<'a>(tree: &'a [Field], id: &FieldId) -> Option<&'a Field> {
    iter_fields(tree)
        .map(|(_, field)| field)
        .find(|field| field.children().iter().any(|c| c.id == *id))
}
