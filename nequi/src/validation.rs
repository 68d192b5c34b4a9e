//! Schema validation for untrusted operation input.
//!
//! A [`Schema`] declares its field constraints in [`Schema::check`] and derives
//! its static type through serde. [`Schema::validate`] runs every constraint
//! against the raw JSON first, collecting *all* violations, and only
//! deserializes once the input is known to be well-formed. Malformed input is
//! reported as a [`ValidationError`]; it never panics.
//!
//! ```rust
//! use nequi::proto::GenerateCodeQrRequest;
//! use nequi::validation::validate;
//!
//! let err = validate::<GenerateCodeQrRequest>(&serde_json::json!({"code": ""})).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Validation failed: code: code is required; value: value is required"
//! );
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path of the offending field; empty for the input root.
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every constraint an input violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Creates an error from a list of issues.
    #[must_use]
    pub const fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// The collected issues, in declaration order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation failed: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<serde_json::Error> for ValidationError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(vec![Issue::new("", value.to_string())])
    }
}

/// Collects constraint violations over one JSON object.
#[derive(Debug)]
pub struct FieldChecker<'a> {
    object: Option<&'a Map<String, Value>>,
    issues: Vec<Issue>,
}

impl<'a> FieldChecker<'a> {
    /// Starts checking `input`. A non-object input records a root issue.
    #[must_use]
    pub fn new(input: &'a Value) -> Self {
        let mut issues = Vec::new();
        let object = input.as_object();
        if object.is_none() {
            issues.push(Issue::new(
                "",
                format!("Expected object, received {}", type_name(input)),
            ));
        }
        Self { object, issues }
    }

    /// Returns `true` if the input is an object and field rules apply.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        self.object.is_some()
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(name))
            .filter(|value| !value.is_null())
    }

    fn push(&mut self, name: &str, message: impl Into<String>) {
        self.issues.push(Issue::new(name, message));
    }

    /// A present, non-empty string.
    pub fn required_string(&mut self, name: &str) -> &mut Self {
        match self.field(name) {
            None => self.push(name, format!("{name} is required")),
            Some(Value::String(s)) if s.is_empty() => {
                self.push(name, format!("{name} is required"));
            }
            Some(Value::String(_)) => {}
            Some(other) => self.push(
                name,
                format!("Expected string, received {}", type_name(other)),
            ),
        }
        self
    }

    /// A string if present. An explicit `null` is rejected like any other
    /// non-string.
    pub fn optional_string(&mut self, name: &str) -> &mut Self {
        let present = self.object.and_then(|object| object.get(name));
        if let Some(other) = present.filter(|value| !value.is_string()) {
            self.push(
                name,
                format!("Expected string, received {}", type_name(other)),
            );
        }
        self
    }

    /// A string equal to one of `allowed`.
    pub fn one_of(&mut self, name: &str, allowed: &[&str]) -> &mut Self {
        let expected = allowed
            .iter()
            .map(|option| format!("'{option}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        match self.field(name) {
            None => self.push(name, format!("{name} is required")),
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => {}
            Some(Value::String(s)) => self.push(
                name,
                format!("Invalid enum value. Expected {expected}, received '{s}'"),
            ),
            Some(other) => self.push(
                name,
                format!("Expected {expected}, received {}", type_name(other)),
            ),
        }
        self
    }

    /// A string exactly equal to `expected`.
    pub fn literal(&mut self, name: &str, expected: &str) -> &mut Self {
        match self.field(name) {
            Some(Value::String(s)) if s == expected => {}
            None => self.push(name, format!("{name} is required")),
            Some(_) => self.push(
                name,
                format!("Invalid literal value, expected \"{expected}\""),
            ),
        }
        self
    }

    /// A non-negative integer, given either as a number or as a decimal string.
    pub fn integer_like(&mut self, name: &str) -> &mut Self {
        match self.field(name) {
            None => self.push(name, format!("{name} is required")),
            Some(Value::Number(n)) if n.as_u64().is_some() => {}
            Some(Value::String(s)) if s.parse::<u64>().is_ok() => {}
            Some(Value::Number(_) | Value::String(_)) => {
                self.push(name, format!("{name} must be a non-negative integer"));
            }
            Some(other) => self.push(
                name,
                format!("Expected string or number, received {}", type_name(other)),
            ),
        }
        self
    }

    /// Consumes the checker.
    ///
    /// # Errors
    ///
    /// Returns every recorded issue if any constraint was violated.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.issues))
        }
    }
}

/// A request or response shape that can be validated from untyped JSON.
pub trait Schema: DeserializeOwned {
    /// Declares the constraints for this shape.
    fn check(fields: &mut FieldChecker<'_>);

    /// Validates `input` and returns the typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated constraint.
    fn validate(input: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldChecker::new(input);
        if fields.is_object() {
            Self::check(&mut fields);
        }
        fields.finish()?;
        Ok(serde_json::from_value(input.clone())?)
    }
}

/// Validates `input` against `S`.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated constraint.
pub fn validate<S: Schema>(input: &Value) -> Result<S, ValidationError> {
    S::validate(input)
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        code: String,
        #[serde(default)]
        note: Option<String>,
        kind: String,
    }

    impl Schema for Sample {
        fn check(fields: &mut FieldChecker<'_>) {
            fields
                .required_string("code")
                .optional_string("note")
                .one_of("kind", &["a", "b"]);
        }
    }

    #[test]
    fn test_valid_input_is_typed() {
        let sample: Sample = validate(&json!({"code": "C1", "kind": "a"})).unwrap();
        assert_eq!(sample.code, "C1");
        assert_eq!(sample.kind, "a");
        assert!(sample.note.is_none());
    }

    #[test]
    fn test_all_issues_are_collected() {
        let err = validate::<Sample>(&json!({"code": "", "note": 5, "kind": "z"})).unwrap_err();
        assert_eq!(err.issues().len(), 3);
        assert_eq!(
            err.to_string(),
            "Validation failed: code: code is required; \
             note: Expected string, received number; \
             kind: Invalid enum value. Expected 'a' | 'b', received 'z'"
        );
    }

    #[test]
    fn test_missing_and_null_fields_are_required() {
        let err = validate::<Sample>(&json!({"code": null})).unwrap_err();
        let paths: Vec<_> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, ["code", "kind"]);
    }

    #[test]
    fn test_null_optional_string_is_rejected() {
        let err = validate::<Sample>(&json!({"code": "C1", "note": null, "kind": "a"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: note: Expected string, received null"
        );
    }

    #[test]
    fn test_non_object_input_is_a_single_root_issue() {
        let err = validate::<Sample>(&json!("hello")).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(
            err.to_string(),
            "Validation failed: Expected object, received string"
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let sample: Sample =
            validate(&json!({"code": "C1", "kind": "b", "extra": true})).unwrap();
        assert_eq!(sample.kind, "b");
    }

    #[test]
    fn test_literal_and_integer_rules() {
        let input = json!({"t": "Basic", "n": "12x"});
        let mut fields = FieldChecker::new(&input);
        fields.literal("t", "Bearer").integer_like("n").integer_like("m");
        let err = fields.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: t: Invalid literal value, expected \"Bearer\"; \
             n: n must be a non-negative integer; m: m is required"
        );
    }

    #[test]
    fn test_integer_rule_accepts_numbers_and_numeric_strings() {
        let input = json!({"a": 3600, "b": "3600"});
        let mut fields = FieldChecker::new(&input);
        fields.integer_like("a").integer_like("b");
        assert!(fields.finish().is_ok());
    }
}
