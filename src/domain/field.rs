//! Field entity: kinds, default values and the schema tree node

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::id::FieldId;

/// Kind of a schema field.
///
/// `Nested` is accepted as a value but carries no behaviour of its own:
/// it is treated as a text-like scalar wherever the kind is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Float,
    Boolean,
    Email,
    #[serde(rename = "URL")]
    Url,
    Date,
    Array,
    Object,
    Nested,
}

/// Coarse grouping of kinds; drives default values and projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindCategory {
    Text,
    Numeric,
    Boolean,
    Container,
}

impl FieldKind {
    /// Kinds offered for creation, in menu order.
    pub const ALL: [FieldKind; 11] = [
        FieldKind::String,
        FieldKind::Number,
        FieldKind::Integer,
        FieldKind::Float,
        FieldKind::Boolean,
        FieldKind::Email,
        FieldKind::Url,
        FieldKind::Date,
        FieldKind::Array,
        FieldKind::Object,
        FieldKind::Nested,
    ];

    pub fn category(self) -> KindCategory {
        match self {
            FieldKind::String
            | FieldKind::Email
            | FieldKind::Url
            | FieldKind::Date
            | FieldKind::Nested => KindCategory::Text,
            FieldKind::Number | FieldKind::Integer | FieldKind::Float => KindCategory::Numeric,
            FieldKind::Boolean => KindCategory::Boolean,
            FieldKind::Array | FieldKind::Object => KindCategory::Container,
        }
    }

    pub fn is_container(self) -> bool {
        self.category() == KindCategory::Container
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Number => "Number",
            FieldKind::Integer => "Integer",
            FieldKind::Float => "Float",
            FieldKind::Boolean => "Boolean",
            FieldKind::Email => "Email",
            FieldKind::Url => "URL",
            FieldKind::Date => "Date",
            FieldKind::Array => "Array",
            FieldKind::Object => "Object",
            FieldKind::Nested => "Nested",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    /// Case-insensitive; `url` and `URL` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownKind(s.to_string()))
    }
}

/// Scalar default value of a non-container field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl DefaultValue {
    /// Initial default for a kind, `None` for containers.
    pub fn for_kind(kind: FieldKind) -> Option<Self> {
        match kind.category() {
            KindCategory::Text => Some(DefaultValue::Text(String::new())),
            KindCategory::Numeric => Some(DefaultValue::Number(0.into())),
            KindCategory::Boolean => Some(DefaultValue::Bool(false)),
            KindCategory::Container => None,
        }
    }

    /// Parse user input into a default matching the kind's category.
    pub fn parse(kind: FieldKind, raw: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidDefault {
            kind,
            value: raw.to_string(),
        };
        match kind.category() {
            KindCategory::Text => Ok(DefaultValue::Text(raw.to_string())),
            KindCategory::Numeric => {
                let trimmed = raw.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Ok(DefaultValue::Number(i.into()));
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(DefaultValue::Number)
                    .ok_or_else(invalid)
            }
            KindCategory::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(DefaultValue::Bool(true)),
                "false" => Ok(DefaultValue::Bool(false)),
                _ => Err(invalid()),
            },
            KindCategory::Container => Err(invalid()),
        }
    }

    /// Whether this value belongs to the given category.
    pub fn matches(&self, category: KindCategory) -> bool {
        matches!(
            (self, category),
            (DefaultValue::Text(_), KindCategory::Text)
                | (DefaultValue::Number(_), KindCategory::Numeric)
                | (DefaultValue::Bool(_), KindCategory::Boolean)
        )
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Number(n) => write!(f, "{}", n),
            DefaultValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// A node of the schema tree.
///
/// Exactly one of `children` / `default_value` is set, chosen by `kind`:
/// containers (Array, Object) carry children, every other kind a default.
/// Both are kept optional so that deserialized input violating this can
/// still be represented; see [`Field::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Field {
    /// Field with an empty name and the kind's initial default or children.
    pub fn new(id: FieldId, kind: FieldKind) -> Self {
        let (children, default_value) = Self::slots_for(kind);
        Self {
            id,
            name: String::new(),
            kind,
            children,
            default_value,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Field>) -> Self {
        self.children = Some(children);
        self
    }

    fn slots_for(kind: FieldKind) -> (Option<Vec<Field>>, Option<DefaultValue>) {
        if kind.is_container() {
            (Some(Vec::new()), None)
        } else {
            (None, DefaultValue::for_kind(kind))
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Children as a slice; empty when absent.
    pub fn children(&self) -> &[Field] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Checks the children/default invariant on this node only.
    pub fn is_well_formed(&self) -> bool {
        if self.is_container() {
            self.children.is_some() && self.default_value.is_none()
        } else {
            self.children.is_none()
                && self
                    .default_value
                    .as_ref()
                    .is_some_and(|v| v.matches(self.kind.category()))
        }
    }

    /// Copy of this subtree with the invariant restored on every node.
    ///
    /// Scalars lose stray children and get a fresh default when theirs is
    /// missing or of the wrong category; containers lose their default and
    /// get an empty child list when none is present.
    pub fn normalized(&self) -> Field {
        let mut field = self.clone();
        if field.is_container() {
            field.default_value = None;
            field.children = Some(
                self.children()
                    .iter()
                    .map(Field::normalized)
                    .collect(),
            );
        } else {
            field.children = None;
            let category = field.kind.category();
            if !field
                .default_value
                .as_ref()
                .is_some_and(|v| v.matches(category))
            {
                field.default_value = DefaultValue::for_kind(field.kind);
            }
        }
        field
    }
}

/// Partial update merged onto a field.
///
/// Each `Some` replaces the corresponding slot; `None` leaves it alone. For
/// `children` and `default_value` the inner option lets an update clear the
/// slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub name: Option<String>,
    pub kind: Option<FieldKind>,
    pub children: Option<Option<Vec<Field>>>,
    pub default_value: Option<Option<DefaultValue>>,
}

impl FieldUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Kind change that re-derives children/default for the new kind.
    ///
    /// Existing children are discarded even when switching between Array
    /// and Object.
    pub fn change_kind(kind: FieldKind) -> Self {
        let (children, default_value) = Field::slots_for(kind);
        Self {
            name: None,
            kind: Some(kind),
            children: Some(children),
            default_value: Some(default_value),
        }
    }

    pub fn set_default(value: DefaultValue) -> Self {
        Self {
            default_value: Some(Some(value)),
            ..Self::default()
        }
    }

    /// Shallow merge: returns `field` with every present slot replaced.
    pub fn apply_to(&self, field: &Field) -> Field {
        Field {
            id: field.id.clone(),
            name: self.name.clone().unwrap_or_else(|| field.name.clone()),
            kind: self.kind.unwrap_or(field.kind),
            children: self
                .children
                .clone()
                .unwrap_or_else(|| field.children.clone()),
            default_value: self
                .default_value
                .clone()
                .unwrap_or_else(|| field.default_value.clone()),
        }
    }
}
