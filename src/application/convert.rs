//! Schema projection: field forest to JSON document
//!
//! Two projections are offered. The simple one maps each named field to a
//! bare category string (`"string"`, `"number"`, ...) or, for objects, to a
//! nested mapping. The JSON-Schema one wraps the same information in
//! `{"type": ...}` / `"properties"` objects. In both, fields with an empty
//! name are skipped and array children are never projected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{json, Map, Value};

use crate::application::ApplicationResult;
use crate::domain::{Field, FieldKind, KindCategory};

/// Output document flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaFormat {
    #[default]
    Simple,
    JsonSchema,
}

impl SchemaFormat {
    pub fn render(self, tree: &[Field]) -> Value {
        match self {
            SchemaFormat::Simple => convert(tree),
            SchemaFormat::JsonSchema => to_json_schema(tree),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaFormat::Simple => "simple",
            SchemaFormat::JsonSchema => "json-schema",
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(SchemaFormat::Simple),
            "json-schema" | "jsonschema" => Ok(SchemaFormat::JsonSchema),
            other => Err(format!(
                "unknown schema format '{}' (expected simple or json-schema)",
                other
            )),
        }
    }
}

/// Project a forest into the simple document.
pub fn convert(tree: &[Field]) -> Value {
    Value::Object(project_fields(tree))
}

fn project_fields(fields: &[Field]) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields.iter().filter(|f| !f.name.is_empty()) {
        // duplicate names: last value wins, first position is kept
        map.insert(field.name.clone(), project(field));
    }
    map
}

/// Simple projection of a single field.
pub fn project(field: &Field) -> Value {
    match field.kind {
        FieldKind::Object => Value::Object(project_fields(field.children())),
        FieldKind::Array => Value::from("array"),
        kind => Value::from(category_name(kind)),
    }
}

/// Lowercase category used in both projections.
pub fn category_name(kind: FieldKind) -> &'static str {
    match kind.category() {
        KindCategory::Text => "string",
        KindCategory::Numeric => "number",
        KindCategory::Boolean => "boolean",
        KindCategory::Container if kind == FieldKind::Array => "array",
        KindCategory::Container => "object",
    }
}

/// Project a forest into a JSON-Schema shaped document.
///
/// Only `type` and nested `properties` are emitted; no formats, defaults or
/// `required` lists.
pub fn to_json_schema(tree: &[Field]) -> Value {
    json!({
        "type": "object",
        "properties": schema_properties(tree),
    })
}

fn schema_properties(fields: &[Field]) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields.iter().filter(|f| !f.name.is_empty()) {
        map.insert(field.name.clone(), schema_property(field));
    }
    map
}

fn schema_property(field: &Field) -> Value {
    match field.kind {
        FieldKind::Object => json!({
            "type": "object",
            "properties": schema_properties(field.children()),
        }),
        kind => json!({ "type": category_name(kind) }),
    }
}

/// Pretty-print a document with `indent` spaces per level.
///
/// Keys keep insertion order. This differs from JavaScript
/// `JSON.stringify(doc, null, 2)` only when a name looks like an array
/// index, which JS objects hoist to the front.
pub fn render_pretty(document: &Value, indent: usize) -> ApplicationResult<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
