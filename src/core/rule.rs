//! Settings rule language
//!
//! A [`SettingsRule`] declares the shape a block's settings object must have:
//! which fields exist, what primitive kind each one holds, and the constraints
//! on its value. Rules are plain data; they are evaluated by
//! [`SettingsValidator`](crate::runtime::validation::SettingsValidator).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Settings;

/// Ordered set of field rules for one block type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsRule {
    pub fields: Vec<FieldRule>,
}

impl SettingsRule {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    /// Look up a field rule by name
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Settings object made of every declared default
    pub fn defaults(&self) -> Settings {
        self.fields
            .iter()
            .filter_map(|f| f.default_value.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }

    /// Names of the fields a settings object must carry
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name.as_str())
    }
}

/// Rule for a single top-level settings field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    /// Key in the settings object
    pub name: String,
    /// Human-readable label for configuration forms
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub constraints: FieldConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_hint: Option<FieldUiHint>,
}

impl FieldRule {
    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            description: String::new(),
            kind,
            required: true,
            default_value: None,
            constraints: FieldConstraints::new(),
            ui_hint: None,
        }
    }

    /// A required string field
    pub fn string(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::String)
    }

    /// A required numeric field
    pub fn number(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Number)
    }

    /// A required boolean field
    pub fn boolean(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Boolean).with_ui_hint(FieldUiHint::new(WidgetType::Checkbox))
    }

    /// A required string field restricted to `values`
    pub fn enumeration(name: &str, label: &str, values: &[&str]) -> Self {
        let mut rule = Self::with_kind(name, label, FieldKind::Enum)
            .with_ui_hint(FieldUiHint::new(WidgetType::Select));
        rule.constraints.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        rule
    }

    /// A required array field whose elements follow `element`
    pub fn array(name: &str, label: &str, element: ElementRule) -> Self {
        Self::with_kind(name, label, FieldKind::Array(Box::new(element)))
            .with_ui_hint(FieldUiHint::new(WidgetType::List))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Merge constraints; `allowed_values` already set by
    /// [`FieldRule::enumeration`] survives unless `constraints` sets its own.
    pub fn with_constraints(mut self, constraints: FieldConstraints) -> Self {
        let allowed = self.constraints.allowed_values.take();
        self.constraints = constraints;
        if self.constraints.allowed_values.is_none() {
            self.constraints.allowed_values = allowed;
        }
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_ui_hint(mut self, ui_hint: FieldUiHint) -> Self {
        self.ui_hint = Some(ui_hint);
        self
    }
}

/// Primitive kind a field holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "element", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    /// String restricted to `FieldConstraints::allowed_values`
    Enum,
    /// Array whose elements follow the boxed rule
    Array(Box<ElementRule>),
}

impl FieldKind {
    /// Short name used in violation messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum => "enum",
            FieldKind::Array(_) => "array",
        }
    }
}

/// Rule applied to each element of an array field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRule {
    pub kind: FieldKind,
    #[serde(default)]
    pub constraints: FieldConstraints,
}

impl ElementRule {
    pub fn string() -> Self {
        Self {
            kind: FieldKind::String,
            constraints: FieldConstraints::new(),
        }
    }

    pub fn number() -> Self {
        Self {
            kind: FieldKind::Number,
            constraints: FieldConstraints::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: FieldConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Field constraints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConstraints {
    /// Minimum value (for numbers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum value (for numbers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Number must be integral (for numbers)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub integer: bool,
    /// Allowed values (for enums)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Minimum length (characters for strings, elements for arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length (characters for strings, elements for arrays)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl FieldConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Inclusive integral range
    pub fn with_int_range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min as f64);
        self.max = Some(max as f64);
        self.integer = true;
        self
    }

    pub fn with_allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_length_range(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }
}

/// UI hints for rendering a field in the block configuration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUiHint {
    pub widget: WidgetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldUiHint {
    pub fn new(widget: WidgetType) -> Self {
        Self {
            widget,
            step: None,
            unit: None,
            help_text: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }
}

/// Widget types for form rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    /// Single-line text input
    Input,
    /// Multi-line text area
    Textarea,
    /// Select dropdown
    Select,
    /// Checkbox or toggle
    Checkbox,
    /// Slider or number stepper
    Slider,
    /// Editable list of items
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_skip_fields_without_default() {
        let rule = SettingsRule::new(vec![
            FieldRule::string("question", "Question").with_default("Why?"),
            FieldRule::string("placeholder", "Placeholder").optional(),
            FieldRule::boolean("required", "Required").with_default(true),
        ]);

        let defaults = rule.defaults();
        let keys: Vec<_> = defaults.keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"question".to_string()));
        assert_eq!(defaults.get("required"), Some(&json!(true)));
        assert!(defaults.get("placeholder").is_none());
    }

    #[test]
    fn enumeration_keeps_allowed_values_when_constraints_are_added() {
        let rule = FieldRule::enumeration("scaleType", "Scale", &["numeric", "stars"])
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), None));

        assert_eq!(
            rule.constraints.allowed_values,
            Some(vec!["numeric".to_string(), "stars".to_string()])
        );
        assert_eq!(rule.constraints.min_length, Some(1));
    }

    #[test]
    fn required_fields_lists_only_required() {
        let rule = SettingsRule::new(vec![
            FieldRule::string("title", "Title"),
            FieldRule::string("buttonText", "Button").optional(),
        ]);
        let required: Vec<_> = rule.required_fields().collect();
        assert_eq!(required, vec!["title"]);
    }

    #[test]
    fn rule_serializes_array_element_kind() {
        let rule = FieldRule::array(
            "options",
            "Options",
            ElementRule::string().with_constraints(FieldConstraints::new().with_length_range(Some(1), None)),
        );
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["kind"]["type"], json!("array"));
        assert_eq!(value["kind"]["element"]["kind"]["type"], json!("string"));
    }

    #[test]
    fn float_bounds_and_number_elements_are_checked() {
        use crate::runtime::validation::{Expectation, FieldViolation, SettingsValidator, ValueKind};

        let rule = SettingsRule::new(vec![
            FieldRule::number("weight", "Weight")
                .optional()
                .required()
                .with_constraints(FieldConstraints::new().with_min(0.5).with_max(2.5)),
            FieldRule::array(
                "thresholds",
                "Thresholds",
                ElementRule::number().with_constraints(FieldConstraints::new().with_min(0.0).with_max(1.0)),
            ),
        ]);
        assert_eq!(rule.required_fields().collect::<Vec<_>>(), vec!["weight", "thresholds"]);

        let ok = SettingsValidator::validate(&rule, &json!({"weight": 1.25, "thresholds": [0.0, 0.5, 1.0]}));
        assert!(ok.is_valid(), "{:?}", ok.errors);

        let bad = SettingsValidator::validate(&rule, &json!({"weight": 3, "thresholds": [0.2, 1.5, "x"]}));
        let found: Vec<_> = bad.violations().cloned().collect();
        assert_eq!(
            found,
            vec![
                FieldViolation::new("weight", Expectation::Max(2.5), ValueKind::Number),
                FieldViolation::new("thresholds[1]", Expectation::Max(1.0), ValueKind::Number),
                FieldViolation::new("thresholds[2]", Expectation::Kind("number".into()), ValueKind::String),
            ]
        );

        let too_low = SettingsValidator::validate(&rule, &json!({"weight": 0.1, "thresholds": []}));
        assert_eq!(
            too_low.violations().cloned().collect::<Vec<_>>(),
            vec![FieldViolation::new("weight", Expectation::Min(0.5), ValueKind::Number)]
        );
    }

    #[test]
    fn explicit_allowed_values_replace_enumeration_values() {
        use crate::runtime::validation::SettingsValidator;

        let field = FieldRule::enumeration("sortType", "Sort", &["open", "closed"])
            .with_constraints(FieldConstraints::new().with_allowed_values(&["closed"]));
        assert_eq!(field.constraints.allowed_values, Some(vec!["closed".to_string()]));

        let rule = SettingsRule::new(vec![field]);
        assert!(SettingsValidator::validate(&rule, &json!({"sortType": "closed"})).is_valid());
        assert!(!SettingsValidator::validate(&rule, &json!({"sortType": "open"})).is_valid());
    }
}
