//! Schema editing service
//!
//! Holds the current field forest, applies one mutation at a time through
//! the pure tree operations and re-derives the output document after every
//! change.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::convert::{render_pretty, SchemaFormat};
use crate::application::ApplicationResult;
use crate::domain::{
    add_field_to_parent, create_default_field_with, find_field_by_id, remove_field_from_array,
    update_field_in_array, DefaultValue, DomainError, Field, FieldId, FieldKind, FieldUpdate,
    IdGenerator,
};

/// Result of a mutation: the field it touched and the document afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub id: FieldId,
    pub document: Value,
}

/// Tunables for a [`SchemaEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Kind given to fields created by `add_nested_field`
    pub nested_kind: FieldKind,
    /// Projection used for the live document
    pub format: SchemaFormat,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            nested_kind: FieldKind::String,
            format: SchemaFormat::Simple,
        }
    }
}

/// Service owning one editable schema.
#[derive(Debug)]
pub struct SchemaEditor {
    fields: Vec<Field>,
    ids: Arc<dyn IdGenerator>,
    options: EditorOptions,
    document: Value,
}

impl SchemaEditor {
    /// Create an empty editor.
    pub fn new(ids: Arc<dyn IdGenerator>, options: EditorOptions) -> Self {
        Self::with_fields(ids, options, Vec::new())
    }

    /// Create an editor starting from an existing forest.
    pub fn with_fields(ids: Arc<dyn IdGenerator>, options: EditorOptions, fields: Vec<Field>) -> Self {
        let document = options.format.render(&fields);
        Self {
            fields,
            ids,
            options,
            document,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Document derived from the current forest.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Switch the projection; the document is re-derived immediately.
    pub fn set_format(&mut self, format: SchemaFormat) {
        self.options.format = format;
        self.document = format.render(&self.fields);
    }

    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        find_field_by_id(&self.fields, id)
    }

    /// Append a default root field of `kind`.
    pub fn add_field(&mut self, kind: FieldKind) -> EditOutcome {
        let field = create_default_field_with(self.ids.as_ref(), kind);
        let id = field.id.clone();
        debug!("add_field: kind={} id={}", kind, id);
        let mut fields = self.fields.clone();
        fields.push(field);
        self.commit(fields, id)
    }

    /// Append a default child to the container `parent_id`.
    pub fn add_nested_field(&mut self, parent_id: &FieldId) -> ApplicationResult<EditOutcome> {
        let parent = self.require(parent_id)?;
        if !parent.is_container() {
            return Err(DomainError::NotAContainer(parent_id.clone()).into());
        }
        let child = create_default_field_with(self.ids.as_ref(), self.options.nested_kind);
        let id = child.id.clone();
        debug!("add_nested_field: parent={} id={}", parent_id, id);
        let fields = add_field_to_parent(&self.fields, parent_id, &child);
        Ok(self.commit(fields, id))
    }

    pub fn rename(&mut self, id: &FieldId, name: &str) -> ApplicationResult<EditOutcome> {
        self.update(id, &FieldUpdate::rename(name))
    }

    /// Change kind, replacing default/children with the new kind's initial ones.
    pub fn change_kind(&mut self, id: &FieldId, kind: FieldKind) -> ApplicationResult<EditOutcome> {
        self.update(id, &FieldUpdate::change_kind(kind))
    }

    /// Parse `raw` against the field's kind and store it as default value.
    pub fn set_default(&mut self, id: &FieldId, raw: &str) -> ApplicationResult<EditOutcome> {
        let kind = self.require(id)?.kind;
        let value = DefaultValue::parse(kind, raw)?;
        self.update(id, &FieldUpdate::set_default(value))
    }

    /// Apply an arbitrary partial update.
    pub fn update(&mut self, id: &FieldId, update: &FieldUpdate) -> ApplicationResult<EditOutcome> {
        self.require(id)?;
        debug!("update: id={} update={:?}", id, update);
        let fields = update_field_in_array(&self.fields, id, update);
        Ok(self.commit(fields, id.clone()))
    }

    /// Delete a field and its subtree.
    pub fn delete(&mut self, id: &FieldId) -> ApplicationResult<EditOutcome> {
        self.require(id)?;
        debug!("delete: id={}", id);
        let fields = remove_field_from_array(&self.fields, id);
        Ok(self.commit(fields, id.clone()))
    }

    /// Drop every field.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} root fields", self.fields.len());
        self.fields.clear();
        self.document = self.options.format.render(&self.fields);
    }

    /// Pretty-printed current document.
    pub fn export(&self, indent: usize) -> ApplicationResult<String> {
        render_pretty(&self.document, indent)
    }

    fn require(&self, id: &FieldId) -> ApplicationResult<&Field> {
        find_field_by_id(&self.fields, id).ok_or_else(|| DomainError::FieldNotFound(id.clone()).into())
    }

    fn commit(&mut self, fields: Vec<Field>, id: FieldId) -> EditOutcome {
        self.fields = fields;
        self.document = self.options.format.render(&self.fields);
        EditOutcome {
            id,
            document: self.document.clone(),
        }
    }
}
