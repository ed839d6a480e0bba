//! Settings validation engine
//!
//! Evaluates a candidate settings value against a [`SettingsRule`] and
//! produces a [`ValidationResult`] listing every field-level violation.
//! Evaluation is total: malformed input of any shape yields issues, never a
//! panic. Extra keys are ignored and defaults are never filled in.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::block::BlockError;
use crate::core::rule::{ElementRule, FieldConstraints, FieldKind, SettingsRule};
use crate::core::Settings;

// ── Result types ────────────────────────────────────────────────────────────

/// JSON kind of an actual value, or its absence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Missing,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Missing,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Bool(_)) => ValueKind::Boolean,
            Some(Value::Number(_)) => ValueKind::Number,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Missing => "missing",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint a field failed to meet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "constraint", content = "bound", rename_all = "camelCase")]
pub enum Expectation {
    /// Field must be present
    Required,
    /// Field must hold this primitive kind
    Kind(String),
    MinLength(usize),
    MaxLength(usize),
    MinItems(usize),
    MaxItems(usize),
    Min(f64),
    Max(f64),
    Integer,
    /// Value must be one of these
    OneOf(Vec<String>),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Required => write!(f, "is required"),
            Expectation::Kind(kind) => write!(f, "must be a {}", kind),
            Expectation::MinLength(n) => write!(f, "must be at least {} characters", n),
            Expectation::MaxLength(n) => write!(f, "must be at most {} characters", n),
            Expectation::MinItems(n) => write!(f, "must contain at least {} items", n),
            Expectation::MaxItems(n) => write!(f, "must contain at most {} items", n),
            Expectation::Min(n) => write!(f, "must be >= {}", n),
            Expectation::Max(n) => write!(f, "must be <= {}", n),
            Expectation::Integer => write!(f, "must be an integer"),
            Expectation::OneOf(values) => write!(f, "must be one of [{}]", values.join(", ")),
        }
    }
}

/// One field failing one constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Field path, e.g. `options` or `options[2]`
    pub field: String,
    pub expected: Expectation,
    pub actual: ValueKind,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, expected: Expectation, actual: ValueKind) -> Self {
        Self {
            field: field.into(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (got {})", self.field, self.expected, self.actual)
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    /// The block type itself is not registered
    UnknownBlockType { type_id: String },
    /// Settings are not a JSON object at all
    NotAnObject { actual: ValueKind },
    Field(FieldViolation),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownBlockType { type_id } => write!(f, "unknown block type '{}'", type_id),
            ValidationIssue::NotAnObject { actual } => write!(f, "settings must be an object (got {})", actual),
            ValidationIssue::Field(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// Outcome of validating one settings value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A result carrying only the top-level unknown-type issue
    pub fn unknown_type(type_id: &str) -> Self {
        Self {
            valid: false,
            errors: vec![ValidationIssue::UnknownBlockType {
                type_id: type_id.to_string(),
            }],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn add_issue(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    fn add_violation(&mut self, field: impl Into<String>, expected: Expectation, actual: ValueKind) {
        self.add_issue(ValidationIssue::Field(FieldViolation::new(field, expected, actual)));
    }

    /// Field-level violations only
    pub fn violations(&self) -> impl Iterator<Item = &FieldViolation> {
        self.errors.iter().filter_map(|issue| match issue {
            ValidationIssue::Field(v) => Some(v),
            _ => None,
        })
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
    }

    /// Convert into the error taxonomy used by block creation
    pub fn into_result(self, block_type: &str) -> Result<(), BlockError> {
        if self.valid {
            return Ok(());
        }
        if let Some(ValidationIssue::UnknownBlockType { type_id }) = self.errors.first() {
            return Err(BlockError::UnknownBlockType(type_id.clone()));
        }
        let violations = self
            .errors
            .into_iter()
            .map(|issue| match issue {
                ValidationIssue::Field(v) => v,
                ValidationIssue::NotAnObject { actual } => {
                    FieldViolation::new("settings", Expectation::Kind("object".into()), actual)
                }
                ValidationIssue::UnknownBlockType { type_id } => {
                    FieldViolation::new("type", Expectation::Kind(type_id), ValueKind::String)
                }
            })
            .collect();
        Err(BlockError::InvalidSettings {
            block_type: block_type.to_string(),
            violations,
        })
    }
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Interprets settings rules
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate `candidate` against every field of `rule`
    pub fn validate(rule: &SettingsRule, candidate: &Value) -> ValidationResult {
        match candidate.as_object() {
            Some(settings) => Self::validate_settings(rule, settings),
            None => {
                let mut result = ValidationResult::ok();
                result.add_issue(ValidationIssue::NotAnObject {
                    actual: ValueKind::of(Some(candidate)),
                });
                result
            }
        }
    }

    /// Validate a settings object against every field of `rule`
    pub fn validate_settings(rule: &SettingsRule, settings: &Settings) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for field in &rule.fields {
            match settings.get(&field.name) {
                None if field.required => {
                    result.add_violation(&field.name, Expectation::Required, ValueKind::Missing);
                }
                None => {}
                Some(value) => {
                    result.merge(Self::check_value(&field.name, &field.kind, &field.constraints, value));
                }
            }
        }

        result
    }

    // ── Individual checks ───────────────────────────────────────────────

    fn check_value(path: &str, kind: &FieldKind, constraints: &FieldConstraints, value: &Value) -> ValidationResult {
        match kind {
            FieldKind::String => Self::check_string(path, constraints, value),
            FieldKind::Number => Self::check_number(path, constraints, value),
            FieldKind::Boolean => Self::check_boolean(path, value),
            FieldKind::Enum => Self::check_enum(path, constraints, value),
            FieldKind::Array(element) => Self::check_array(path, element, constraints, value),
        }
    }

    fn kind_mismatch(path: &str, kind: &FieldKind, value: &Value) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.add_violation(path, Expectation::Kind(kind.name().into()), ValueKind::of(Some(value)));
        result
    }

    fn check_string(path: &str, constraints: &FieldConstraints, value: &Value) -> ValidationResult {
        let Some(s) = value.as_str() else {
            return Self::kind_mismatch(path, &FieldKind::String, value);
        };
        let mut result = ValidationResult::ok();
        let len = s.chars().count();
        if let Some(min) = constraints.min_length {
            if len < min {
                result.add_violation(path, Expectation::MinLength(min), ValueKind::String);
            }
        }
        if let Some(max) = constraints.max_length {
            if len > max {
                result.add_violation(path, Expectation::MaxLength(max), ValueKind::String);
            }
        }
        result
    }

    fn check_number(path: &str, constraints: &FieldConstraints, value: &Value) -> ValidationResult {
        let Value::Number(number) = value else {
            return Self::kind_mismatch(path, &FieldKind::Number, value);
        };
        let mut result = ValidationResult::ok();
        // u64/i64 always convert; as_f64 is None only for arbitrary precision
        let n = number.as_f64().unwrap_or(f64::NAN);
        if constraints.integer && !(number.is_i64() || number.is_u64()) {
            result.add_violation(path, Expectation::Integer, ValueKind::Number);
        }
        if let Some(min) = constraints.min {
            if n.is_nan() || n < min {
                result.add_violation(path, Expectation::Min(min), ValueKind::Number);
            }
        }
        if let Some(max) = constraints.max {
            if n.is_nan() || n > max {
                result.add_violation(path, Expectation::Max(max), ValueKind::Number);
            }
        }
        result
    }

    fn check_boolean(path: &str, value: &Value) -> ValidationResult {
        if value.is_boolean() {
            ValidationResult::ok()
        } else {
            Self::kind_mismatch(path, &FieldKind::Boolean, value)
        }
    }

    fn check_enum(path: &str, constraints: &FieldConstraints, value: &Value) -> ValidationResult {
        let Some(s) = value.as_str() else {
            return Self::kind_mismatch(path, &FieldKind::Enum, value);
        };
        let mut result = ValidationResult::ok();
        if let Some(allowed) = &constraints.allowed_values {
            if !allowed.iter().any(|a| a == s) {
                result.add_violation(path, Expectation::OneOf(allowed.clone()), ValueKind::String);
            }
        }
        result
    }

    fn check_array(path: &str, element: &ElementRule, constraints: &FieldConstraints, value: &Value) -> ValidationResult {
        let Some(items) = value.as_array() else {
            return Self::kind_mismatch(path, &FieldKind::Array(Box::new(element.clone())), value);
        };
        let mut result = ValidationResult::ok();
        if let Some(min) = constraints.min_length {
            if items.len() < min {
                result.add_violation(path, Expectation::MinItems(min), ValueKind::Array);
            }
        }
        if let Some(max) = constraints.max_length {
            if items.len() > max {
                result.add_violation(path, Expectation::MaxItems(max), ValueKind::Array);
            }
        }
        for (i, item) in items.iter().enumerate() {
            let item_path = format!("{}[{}]", path, i);
            result.merge(Self::check_value(&item_path, &element.kind, &element.constraints, item));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::{ElementRule, FieldConstraints, FieldRule};
    use serde_json::json;

    fn survey_rule() -> SettingsRule {
        SettingsRule::new(vec![
            FieldRule::string("question", "Question")
                .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(20))),
            FieldRule::array(
                "options",
                "Options",
                ElementRule::string().with_constraints(FieldConstraints::new().with_length_range(Some(1), None)),
            )
            .with_constraints(FieldConstraints::new().with_length_range(Some(2), Some(3))),
            FieldRule::number("maxValue", "Max")
                .optional()
                .with_constraints(FieldConstraints::new().with_int_range(2, 10)),
            FieldRule::enumeration("scaleType", "Scale", &["numeric", "stars"]).optional(),
            FieldRule::boolean("required", "Required").optional(),
        ])
    }

    #[test]
    fn test_valid_settings_pass() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "b"], "maxValue": 5, "scaleType": "stars"}),
        );
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_non_object_is_single_issue() {
        for candidate in [json!(null), json!([1, 2]), json!("text"), json!(4)] {
            let result = SettingsValidator::validate(&survey_rule(), &candidate);
            assert!(!result.valid);
            assert_eq!(result.errors.len(), 1);
            assert!(matches!(result.errors[0], ValidationIssue::NotAnObject { .. }));
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let result = SettingsValidator::validate(&survey_rule(), &json!({}));
        let fields: Vec<_> = result.violations().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["question", "options"]);
        assert!(result.violations().all(|v| v.expected == Expectation::Required));
    }

    #[test]
    fn test_wrong_kind_reports_actual_kind() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": 12, "options": "a,b", "required": "yes"}),
        );
        let violations: Vec<_> = result.violations().collect();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].actual, ValueKind::Number);
        assert_eq!(violations[1].expected, Expectation::Kind("array".into()));
        assert_eq!(violations[2].actual, ValueKind::String);
    }

    #[test]
    fn test_null_is_a_kind_mismatch_for_optional_fields() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "b"], "required": null}),
        );
        let violation = result.violations().next().unwrap();
        assert_eq!(violation.field, "required");
        assert_eq!(violation.actual, ValueKind::Null);
    }

    #[test]
    fn test_numeric_bounds_and_integer() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "b"], "maxValue": 11.5}),
        );
        let expected: Vec<_> = result.violations().map(|v| v.expected.clone()).collect();
        assert_eq!(expected, vec![Expectation::Integer, Expectation::Max(10.0)]);
    }

    #[test]
    fn test_enum_membership() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "b"], "scaleType": "emoji"}),
        );
        let violation = result.violations().next().unwrap();
        assert_eq!(
            violation.expected,
            Expectation::OneOf(vec!["numeric".into(), "stars".into()])
        );
    }

    #[test]
    fn test_array_bounds_and_element_paths() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "", 3, "d"]}),
        );
        let violations: Vec<_> = result.violations().collect();
        assert_eq!(violations[0].expected, Expectation::MaxItems(3));
        assert_eq!(violations[1].field, "options[1]");
        assert_eq!(violations[1].expected, Expectation::MinLength(1));
        assert_eq!(violations[2].field, "options[2]");
        assert_eq!(violations[2].actual, ValueKind::Number);
    }

    #[test]
    fn test_string_length_counts_characters() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "é".repeat(20), "options": ["a", "b"]}),
        );
        assert!(result.is_valid());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let result = SettingsValidator::validate(
            &survey_rule(),
            &json!({"question": "Pick", "options": ["a", "b"], "futureField": {"nested": true}}),
        );
        assert!(result.is_valid());
    }

    #[test]
    fn test_into_result_maps_to_block_errors() {
        let unknown = ValidationResult::unknown_type("unknown-xyz").into_result("unknown-xyz");
        assert_eq!(unknown, Err(BlockError::UnknownBlockType("unknown-xyz".into())));

        let invalid = SettingsValidator::validate(&survey_rule(), &json!({"question": "Pick"}))
            .into_result("multiple-choice")
            .unwrap_err();
        assert_eq!(invalid.violations().len(), 1);
        assert_eq!(invalid.violations()[0].field, "options");
    }

    #[test]
    fn test_violation_display() {
        let violation = FieldViolation::new("options", Expectation::MinItems(2), ValueKind::Array);
        assert_eq!(violation.to_string(), "options must contain at least 2 items (got array)");
    }
}
