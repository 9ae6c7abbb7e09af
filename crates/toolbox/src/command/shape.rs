//! Declared input shapes and argument validation

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{json, Map, Value};

use crate::error::ValidationError;

/// Closed set of field kinds a command may declare
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// One of a finite set of string values
    Enum(&'static [&'static str]),
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Enum(values) => value
                .as_str()
                .is_some_and(|s| values.iter().any(|v| *v == s)),
        }
    }

    fn schema_type(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Enum(_) => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => f.write_str("string"),
            FieldKind::Number => f.write_str("number"),
            FieldKind::Boolean => f.write_str("boolean"),
            FieldKind::Enum(values) => write!(f, "one of: {}", values.join(", ")),
        }
    }
}

/// Constraint on a single input field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    /// Inclusive bounds, only checked for `Number`
    pub range: Option<(f64, f64)>,
    pub description: String,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            range: None,
            description: String::new(),
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Value substituted when the caller omits this field
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if !self.kind.accepts(value) {
            return Err(ValidationError::invalid(self.name, &self.kind));
        }
        if let (FieldKind::Number, Some((min, max))) = (self.kind, self.range) {
            let in_range = value.as_f64().is_some_and(|n| n >= min && n <= max);
            if !in_range {
                return Err(ValidationError::InvalidField {
                    field: self.name,
                    expected: format!("number between {min} and {max}"),
                });
            }
        }
        Ok(())
    }

    fn json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.schema_type()));
        if let FieldKind::Enum(values) = self.kind {
            prop.insert("enum".into(), json!(values));
        }
        if let Some((min, max)) = self.range {
            prop.insert("minimum".into(), json!(min));
            prop.insert("maximum".into(), json!(max));
        }
        if let Some(ref default) = self.default {
            prop.insert("default".into(), default.clone());
        }
        if !self.description.is_empty() {
            prop.insert("description".into(), json!(&self.description));
        }
        Value::Object(prop)
    }
}

/// Ordered list of field constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputShape {
    fields: Vec<FieldSpec>,
}

impl InputShape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FieldSpec) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Check raw arguments against the declared fields, in declared order.
    ///
    /// Stops at the first offending field. A JSON `null` counts as absent,
    /// and a missing argument object counts as empty. Undeclared fields are
    /// dropped.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedArgs, ValidationError> {
        let empty = Map::new();
        let raw = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(ValidationError::NotAnObject),
        };

        let mut values = BTreeMap::new();
        for field in &self.fields {
            match raw.get(field.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    field.check(value)?;
                    values.insert(field.name, value.clone());
                }
                None if field.required => {
                    return Err(ValidationError::MissingField(field.name));
                }
                None => {
                    if let Some(ref default) = field.default {
                        values.insert(field.name, default.clone());
                    }
                }
            }
        }
        Ok(ValidatedArgs { values })
    }

    /// MCP `inputSchema` for `tools/list`
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Arguments that passed validation, with defaults filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArgs {
    values: BTreeMap<&'static str, Value>,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPS: &[&str] = &["add", "subtract"];

    fn shape() -> InputShape {
        let mut shape = InputShape::new();
        shape.push(FieldSpec::required("operation", FieldKind::Enum(OPS)));
        shape.push(FieldSpec::required("a", FieldKind::Number));
        shape.push(FieldSpec::optional("formal", FieldKind::Boolean).with_default(false));
        shape.push(FieldSpec::optional("country", FieldKind::String));
        shape.push(FieldSpec::optional("days", FieldKind::Number).with_range(1.0, 10.0));
        shape
    }

    #[test]
    fn test_defaults_filled_and_optional_left_unset() {
        let args = shape()
            .validate(&json!({ "operation": "add", "a": 1 }))
            .unwrap();
        assert_eq!(args.boolean("formal"), Some(false));
        assert!(!args.contains("country"));
        assert!(!args.contains("days"));
        assert_eq!(args.number("a"), Some(1.0));
        assert_eq!(args.str("operation"), Some("add"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = shape().validate(&json!({ "operation": "add" })).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("a"));
    }

    #[test]
    fn test_first_invalid_field_in_declared_order_wins() {
        // both wrong; "operation" is declared first
        let err = shape()
            .validate(&json!({ "a": "one", "operation": "pow" }))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'operation': expected one of: add, subtract"
        );
    }

    #[test]
    fn test_no_coercion_between_kinds() {
        let err = shape()
            .validate(&json!({ "operation": "add", "a": "4" }))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'a': expected number"
        );
    }

    #[test]
    fn test_null_counts_as_absent() {
        let err = shape()
            .validate(&json!({ "operation": "add", "a": null }))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("a"));

        let args = shape()
            .validate(&json!({ "operation": "add", "a": 2, "formal": null }))
            .unwrap();
        assert_eq!(args.boolean("formal"), Some(false));
    }

    #[test]
    fn test_range_checked_inclusively() {
        let ok = shape().validate(&json!({ "operation": "add", "a": 1, "days": 10 }));
        assert!(ok.is_ok());
        let err = shape()
            .validate(&json!({ "operation": "add", "a": 1, "days": 11 }))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'days': expected number between 1 and 10"
        );
    }

    #[test]
    fn test_null_arguments_is_empty_object() {
        let mut shape = InputShape::new();
        shape.push(FieldSpec::optional("formal", FieldKind::Boolean));
        assert!(shape.validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let err = shape().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn test_unknown_fields_dropped() {
        let args = shape()
            .validate(&json!({ "operation": "add", "a": 1, "extra": true }))
            .unwrap();
        assert!(!args.contains("extra"));
    }

    #[test]
    fn test_json_schema() {
        let schema = shape().json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["operation", "a"]));
        assert_eq!(schema["properties"]["operation"]["enum"], json!(["add", "subtract"]));
        assert_eq!(schema["properties"]["formal"]["default"], json!(false));
        assert_eq!(schema["properties"]["days"]["maximum"], json!(10.0));
    }
}
