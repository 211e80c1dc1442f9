//! User data models and their resolution.
//!
//! [`resolve_models`] is the single place that turns whatever the caller put
//! in `custom.models` into something every per-model renderer can iterate
//! blindly: at least one model, every model with at least one field, names
//! in PascalCase.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataModel {
    pub name: String,
    pub fields: Vec<DataField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DataField {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

// ── Field kinds ──────────────────────────────────────────────────────────────

/// Semantic field type. Anything unrecognized is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Bool,
    DateTime,
    Text,
}

impl FieldKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "int" | "integer" => Self::Int,
            "float" | "float64" | "double" | "decimal" => Self::Float,
            "bool" | "boolean" => Self::Bool,
            "datetime" | "timestamp" | "time" => Self::DateTime,
            _ => Self::Text,
        }
    }

    pub const fn go_type(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float64",
            Self::Bool => "bool",
            Self::DateTime | Self::Text => "string",
        }
    }

    pub const fn prisma_type(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Boolean",
            Self::DateTime => "DateTime",
            Self::Text => "String",
        }
    }

    pub const fn sqlalchemy_type(self) -> &'static str {
        match self {
            Self::Int => "Integer",
            Self::Float => "Float",
            Self::Bool => "Boolean",
            Self::DateTime => "DateTime",
            Self::Text => "String",
        }
    }

    pub const fn python_hint(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime | Self::Text => "str",
        }
    }

    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "DECIMAL(10,2)",
            Self::Bool => "BOOLEAN",
            Self::DateTime => "TIMESTAMP",
            Self::Text => "VARCHAR(255)",
        }
    }

    /// Sample literal for seed data and fake repositories, JavaScript syntax.
    pub const fn js_sample(self) -> &'static str {
        match self {
            Self::Int => "1",
            Self::Float => "1.0",
            Self::Bool => "true",
            Self::DateTime => "new Date().toISOString()",
            Self::Text => "'sample'",
        }
    }

    /// Sample literal, Python syntax.
    pub const fn py_sample(self) -> &'static str {
        match self {
            Self::Int => "1",
            Self::Float => "1.0",
            Self::Bool => "True",
            Self::DateTime | Self::Text => "\"sample\"",
        }
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// A field after resolution: trimmed name, non-empty type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub kind_name: String,
}

impl ResolvedField {
    pub fn kind(&self) -> FieldKind {
        FieldKind::parse(&self.kind_name)
    }

    pub fn is_id(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }
}

/// A model after resolution: PascalCase name and at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub name: String,
    pub fields: Vec<ResolvedField>,
}

impl ResolvedModel {
    /// `User` → `user`.
    pub fn lower(&self) -> String {
        self.name.to_lowercase()
    }

    /// `OrderLine` → `order_line`.
    pub fn snake(&self) -> String {
        to_snake(&self.name)
    }

    /// Conventional table / collection name: `users`.
    pub fn table(&self) -> String {
        format!("{}s", self.lower())
    }

    /// Fields except a user-declared `id` (generated code adds its own key).
    pub fn data_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|f| !f.is_id())
    }
}

/// Name of the model substituted when nothing usable was supplied.
pub const PLACEHOLDER_MODEL: &str = "Item";

pub fn placeholder_model() -> ResolvedModel {
    ResolvedModel {
        name: PLACEHOLDER_MODEL.into(),
        fields: vec![
            ResolvedField {
                name: "id".into(),
                kind_name: "int".into(),
            },
            ResolvedField {
                name: "name".into(),
                kind_name: "string".into(),
            },
        ],
    }
}

/// Resolution result: the models plus whether the placeholder was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub models: Vec<ResolvedModel>,
    pub placeholder: bool,
}

/// Models with a usable name, canonicalized. May be empty.
///
/// Names that canonicalize to the same identifier collapse to the first one,
/// since they would otherwise write the same artifact paths.
pub fn usable_models(input: &[DataModel]) -> Vec<ResolvedModel> {
    let mut seen = HashSet::new();
    input
        .iter()
        .filter_map(|model| {
            let name = to_pascal(&model.name);
            if name.is_empty() || !seen.insert(name.clone()) {
                return None;
            }

            let mut fields: Vec<ResolvedField> = model
                .fields
                .iter()
                .filter_map(|field| {
                    let name = field.name.trim();
                    if name.is_empty() {
                        return None;
                    }
                    let kind = field.kind.trim();
                    Some(ResolvedField {
                        name: name.to_string(),
                        kind_name: if kind.is_empty() { "string" } else { kind }.to_string(),
                    })
                })
                .collect();

            if fields.is_empty() {
                fields.push(ResolvedField {
                    name: "name".into(),
                    kind_name: "string".into(),
                });
            }

            Some(ResolvedModel { name, fields })
        })
        .collect()
}

/// Resolve user models; never returns an empty set.
pub fn resolve_models(input: &[DataModel]) -> ModelSet {
    let models = usable_models(input);
    if models.is_empty() {
        ModelSet {
            models: vec![placeholder_model()],
            placeholder: true,
        }
    } else {
        ModelSet {
            models,
            placeholder: false,
        }
    }
}

// ── Case helpers ─────────────────────────────────────────────────────────────

/// `order_line`, `order-line`, `ORDER line` → `OrderLine`.
///
/// Any character that is not ASCII alphanumeric separates words, so the
/// result is always a bare identifier (`../x/y` → `XY`). Each word gets its
/// first letter upper-cased and the rest lower-cased.
pub fn to_pascal(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut word = part.to_ascii_lowercase();
            word[..1].make_ascii_uppercase();
            word
        })
        .collect()
}

/// `OrderLine` → `order_line`.
pub fn to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `created_at` → `createdAt`.
pub fn to_camel(input: &str) -> String {
    let pascal = to_pascal(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, fields: &[(&str, &str)]) -> DataModel {
        DataModel {
            name: name.into(),
            fields: fields.iter().map(|(n, t)| DataField::new(*n, *t)).collect(),
        }
    }

    #[test]
    fn empty_input_yields_placeholder() {
        let set = resolve_models(&[]);
        assert!(set.placeholder);
        assert_eq!(set.models.len(), 1);
        assert_eq!(set.models[0].name, "Item");
        assert_eq!(set.models[0].fields.len(), 2);
    }

    #[test]
    fn whitespace_name_counts_as_absent() {
        let set = resolve_models(&[model("   ", &[("email", "string")])]);
        assert!(set.placeholder);
        assert_eq!(set.models, vec![placeholder_model()]);
    }

    #[test]
    fn fields_are_trimmed_and_defaulted() {
        let set = resolve_models(&[model(
            " order_line ",
            &[(" qty ", "int"), ("", "bool"), ("note", "  ")],
        )]);
        assert!(!set.placeholder);
        let m = &set.models[0];
        assert_eq!(m.name, "OrderLine");
        assert_eq!(m.fields.len(), 2);
        assert_eq!(m.fields[0].name, "qty");
        assert_eq!(m.fields[1].kind_name, "string");
        assert_eq!(m.snake(), "order_line");
        assert_eq!(m.table(), "orderlines");
    }

    #[test]
    fn model_without_fields_gets_one() {
        let set = resolve_models(&[model("Tag", &[])]);
        assert_eq!(set.models[0].fields.len(), 1);
        assert_eq!(set.models[0].fields[0].name, "name");
    }

    #[test]
    fn separator_only_names_are_dropped() {
        assert!(usable_models(&[model("__-", &[])]).is_empty());
    }

    #[test]
    fn kind_mappings() {
        assert_eq!(FieldKind::parse("Decimal").sql_type(), "DECIMAL(10,2)");
        assert_eq!(FieldKind::parse("timestamp").go_type(), "string");
        assert_eq!(FieldKind::parse("boolean").prisma_type(), "Boolean");
        assert_eq!(FieldKind::parse("whatever").python_hint(), "str");
    }

    #[test]
    fn path_characters_never_reach_the_name() {
        let models = usable_models(&[model("../../../../tmp/pwn", &[]), model("a/b\\c", &[])]);
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["TmpPwn", "ABC"]);
        assert!(usable_models(&[model("../..", &[]), model("./", &[])]).is_empty());
    }

    #[test]
    fn all_caps_and_mixed_case_names_are_normalized() {
        let set = resolve_models(&[model("USER", &[]), model("user_ID", &[])]);
        assert_eq!(set.models[0].name, "User");
        assert_eq!(set.models[0].snake(), "user");
        assert_eq!(set.models[1].name, "UserId");
        assert_eq!(set.models[1].snake(), "user_id");
    }

    #[test]
    fn names_with_the_same_canonical_form_collapse() {
        let set = resolve_models(&[
            model("user", &[("email", "string")]),
            model("User", &[("age", "int")]),
            model(" USER ", &[]),
        ]);
        assert_eq!(set.models.len(), 1);
        assert_eq!(set.models[0].fields[0].name, "email");
    }

    #[test]
    fn case_helpers() {
        assert_eq!(to_pascal("created_at"), "CreatedAt");
        assert_eq!(to_pascal("OrderLine"), "Orderline");
        assert_eq!(to_snake("CreatedAt"), "created_at");
        assert_eq!(to_camel("created_at"), "createdAt");
    }
}
