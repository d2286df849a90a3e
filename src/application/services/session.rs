//! Editing session: executes parsed script commands against an editor
//!
//! Keeps the list of fields created so far so that commands can refer to
//! them as `$1`, `$2`, ... without knowing their generated ids.

use serde_json::Value;
use tracing::debug;

use crate::application::convert::{convert, to_json_schema};
use crate::application::script::{FieldRef, ScriptCommand};
use crate::application::services::editor::{EditOutcome, SchemaEditor};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Field, FieldId};

/// What a command produced, for the front end to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The tree changed; carries the touched field and the new document
    Changed(EditOutcome),
    /// All fields were removed
    Cleared,
    /// Render the current field tree
    Tree,
    /// A document to print
    Document(Value),
    /// Raw field tree as JSON text
    Dump(String),
    Help,
    Quit,
}

#[derive(Debug)]
pub struct ScriptSession {
    editor: SchemaEditor,
    created: Vec<FieldId>,
}

impl ScriptSession {
    pub fn new(editor: SchemaEditor) -> Self {
        Self {
            editor,
            created: Vec::new(),
        }
    }

    pub fn editor(&self) -> &SchemaEditor {
        &self.editor
    }

    pub fn fields(&self) -> &[Field] {
        self.editor.fields()
    }

    /// Ids created so far, in creation order.
    pub fn created(&self) -> &[FieldId] {
        &self.created
    }

    pub fn resolve(&self, field: &FieldRef) -> ApplicationResult<FieldId> {
        let unresolved = || ApplicationError::UnresolvedRef(field.to_string());
        match field {
            FieldRef::Id(id) => Ok(id.clone()),
            FieldRef::Created(n) => n
                .checked_sub(1)
                .and_then(|i| self.created.get(i))
                .cloned()
                .ok_or_else(unresolved),
            FieldRef::Latest => self.created.last().cloned().ok_or_else(unresolved),
        }
    }

    pub fn execute(&mut self, command: &ScriptCommand) -> ApplicationResult<Reply> {
        debug!("execute: {:?}", command);
        let reply = match command {
            ScriptCommand::Add { kind, name } => {
                let outcome = self.editor.add_field(*kind);
                self.created.push(outcome.id.clone());
                Reply::Changed(self.maybe_rename(outcome, name.as_deref())?)
            }
            ScriptCommand::Nest { parent, name } => {
                let parent = self.resolve(parent)?;
                let outcome = self.editor.add_nested_field(&parent)?;
                self.created.push(outcome.id.clone());
                Reply::Changed(self.maybe_rename(outcome, name.as_deref())?)
            }
            ScriptCommand::Rename { target, name } => {
                let id = self.resolve(target)?;
                Reply::Changed(self.editor.rename(&id, name)?)
            }
            ScriptCommand::Kind { target, kind } => {
                let id = self.resolve(target)?;
                Reply::Changed(self.editor.change_kind(&id, *kind)?)
            }
            ScriptCommand::Default { target, value } => {
                let id = self.resolve(target)?;
                Reply::Changed(self.editor.set_default(&id, value)?)
            }
            ScriptCommand::Remove { target } => {
                let id = self.resolve(target)?;
                Reply::Changed(self.editor.delete(&id)?)
            }
            ScriptCommand::Clear => {
                self.editor.clear();
                Reply::Cleared
            }
            ScriptCommand::Show => Reply::Tree,
            ScriptCommand::Schema => Reply::Document(convert(self.editor.fields())),
            ScriptCommand::JsonSchema => Reply::Document(to_json_schema(self.editor.fields())),
            ScriptCommand::Dump => Reply::Dump(serde_json::to_string_pretty(self.editor.fields())?),
            ScriptCommand::Help => Reply::Help,
            ScriptCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    fn maybe_rename(&mut self, outcome: EditOutcome, name: Option<&str>) -> ApplicationResult<EditOutcome> {
        match name {
            Some(name) => self.editor.rename(&outcome.id, name),
            None => Ok(outcome),
        }
    }
}
