//! Editor-side audience rules and groups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean operator joining the children of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator. Only equality is supported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
}

/// How a field's value is shaped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Literal string comparison
    Text,
    /// Integer id of a referenced entity (department, role)
    IntegerRef,
    /// Indirection through an extra-attribute slot
    Extra,
}

/// Employee attribute a rule compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Code,
    FirstName,
    LastName,
    Department,
    Role,
    ExtraField,
    /// Any attribute this crate has no special handling for
    Other(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Code => "code",
            FieldKind::FirstName => "first_name",
            FieldKind::LastName => "last_name",
            FieldKind::Department => "memberships__department__id",
            FieldKind::Role => "memberships__role__id",
            FieldKind::ExtraField => "extra_field_values__value",
            FieldKind::Other(name) => name,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            FieldKind::Department | FieldKind::Role => ValueKind::IntegerRef,
            FieldKind::ExtraField => ValueKind::Extra,
            FieldKind::Code
            | FieldKind::FirstName
            | FieldKind::LastName
            | FieldKind::Other(_) => ValueKind::Text,
        }
    }

    /// Display label used by the console.
    pub fn label(&self) -> &str {
        match self {
            FieldKind::Code => "Código",
            FieldKind::FirstName => "Nombre",
            FieldKind::LastName => "Apellido",
            FieldKind::Department => "Departamento",
            FieldKind::Role => "Rol",
            FieldKind::ExtraField => "Campo extra",
            FieldKind::Other(name) => name,
        }
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "code" => FieldKind::Code,
            "first_name" => FieldKind::FirstName,
            "last_name" => FieldKind::LastName,
            "memberships__department__id" => FieldKind::Department,
            "memberships__role__id" => FieldKind::Role,
            "extra_field_values__value" => FieldKind::ExtraField,
            _ => FieldKind::Other(s),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(s: &str) -> Self {
        FieldKind::from(s.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single leaf condition as edited in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub field: FieldKind,

    #[serde(default)]
    pub operator: Operator,

    /// Comparison value for ordinary fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Extra-attribute slot id (extra field rules only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_extra: Option<String>,

    /// Extra-attribute value (extra field rules only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_extra: Option<String>,
}

impl Rule {
    /// Rule comparing an ordinary field against a value.
    pub fn new(field: impl Into<FieldKind>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: Operator::Eq,
            value: Some(value.into()),
            field_extra: None,
            value_extra: None,
        }
    }

    /// Rule comparing an extra-attribute slot against a value.
    pub fn extra(field_extra: impl Into<String>, value_extra: impl Into<String>) -> Self {
        Self {
            field: FieldKind::ExtraField,
            operator: Operator::Eq,
            value: None,
            field_extra: Some(field_extra.into()),
            value_extra: Some(value_extra.into()),
        }
    }
}

/// Rules joined by one combinator. A list of groups reads as a chain
/// where each group nests the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub combinator: Combinator,

    #[serde(default)]
    pub list: Vec<Rule>,
}

impl Group {
    pub fn new(combinator: Combinator, list: Vec<Rule>) -> Self {
        Self { combinator, list }
    }
}
