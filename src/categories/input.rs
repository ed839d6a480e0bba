//! Input blocks
//!
//! Survey questions: free text, rating scales, short typed answers, choice
//! lists, and binary yes/no questions.

use serde_json::json;

use super::{example, features, BlockCategory};
use crate::core::block::{BlockMetadata, Complexity};
use crate::core::rule::{ElementRule, FieldConstraints, FieldRule, FieldUiHint, SettingsRule, WidgetType};
use crate::core::BlockTypeId;

/// Question prompt shared by every input block
fn question(default: &str) -> FieldRule {
    FieldRule::string("question", "Question")
        .with_default(default)
        .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(500)))
        .with_ui_hint(FieldUiHint::new(WidgetType::Textarea))
}

fn required_toggle(default: bool) -> FieldRule {
    FieldRule::boolean("required", "Required")
        .with_default(default)
        .with_description("Participants must answer before continuing")
}

pub fn open_question() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        question("What do you think about this?"),
        FieldRule::string("placeholder", "Placeholder")
            .optional()
            .with_default("Type your answer here...")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(200))),
        required_toggle(true),
        FieldRule::number("maxLength", "Maximum Length")
            .optional()
            .with_default(1000)
            .with_constraints(FieldConstraints::new().with_int_range(1, 10_000))
            .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(50.0).with_unit("characters")),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::OpenQuestion,
        display_name: "Open Question".into(),
        description: "Collects a free-text answer".into(),
        category: BlockCategory::Input,
        icon: "message-square".into(),
        estimated_duration_secs: 60,
        complexity: Complexity::Simple,
        requires_interaction: true,
        supported_features: features(&["required-toggle", "character-limit", "text-analysis"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "First impression",
            "Captures unprompted reactions",
            json!({
                "question": "What was your first impression of the homepage?",
                "required": true,
                "maxLength": 500
            }),
        )],
        validation_rule: rule,
    }
}

pub fn opinion_scale() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        question("How likely are you to recommend us to a friend?"),
        FieldRule::enumeration("scaleType", "Scale Type", &["numeric", "stars", "emoji"]).with_default("numeric"),
        FieldRule::number("minValue", "Minimum")
            .with_default(0)
            .with_constraints(FieldConstraints::new().with_int_range(0, 1)),
        FieldRule::number("maxValue", "Maximum")
            .with_default(10)
            .with_constraints(FieldConstraints::new().with_int_range(2, 10))
            .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(1.0)),
        FieldRule::string("minLabel", "Low Label")
            .optional()
            .with_default("Not likely")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(50))),
        FieldRule::string("maxLabel", "High Label")
            .optional()
            .with_default("Very likely")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(50))),
        required_toggle(true),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::OpinionScale,
        display_name: "Opinion Scale".into(),
        description: "Rates agreement or satisfaction on a numeric, star, or emoji scale".into(),
        category: BlockCategory::Input,
        icon: "gauge".into(),
        estimated_duration_secs: 20,
        complexity: Complexity::Simple,
        requires_interaction: true,
        supported_features: features(&["required-toggle", "scale-labels", "nps"]),
        default_settings: rule.defaults(),
        examples: vec![
            example(
                "Net Promoter Score",
                "Classic 0-10 NPS question",
                json!({
                    "question": "How likely are you to recommend us to a friend?",
                    "scaleType": "numeric",
                    "minValue": 0,
                    "maxValue": 10,
                    "required": true
                }),
            ),
            example(
                "5-star rating",
                "",
                json!({
                    "question": "Rate your experience",
                    "scaleType": "stars",
                    "minValue": 1,
                    "maxValue": 5,
                    "required": false
                }),
            ),
        ],
        validation_rule: rule,
    }
}

pub fn simple_input() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        question("Please enter your answer"),
        FieldRule::enumeration("inputType", "Input Type", &["text", "email", "number", "date"]).with_default("text"),
        FieldRule::string("placeholder", "Placeholder")
            .optional()
            .with_default("")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(200))),
        required_toggle(false),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::SimpleInput,
        display_name: "Simple Input".into(),
        description: "Collects a short typed value such as an email or a date".into(),
        category: BlockCategory::Input,
        icon: "text-cursor".into(),
        estimated_duration_secs: 20,
        complexity: Complexity::Simple,
        requires_interaction: true,
        supported_features: features(&["required-toggle", "input-validation"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Contact email",
            "Optional follow-up address",
            json!({
                "question": "Can we contact you about your answers?",
                "inputType": "email",
                "placeholder": "you@example.com",
                "required": false
            }),
        )],
        validation_rule: rule,
    }
}

pub fn multiple_choice() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        question("Which option do you prefer?"),
        FieldRule::array(
            "options",
            "Options",
            ElementRule::string().with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(200))),
        )
        .with_default(json!(["Option A", "Option B", "Option C"]))
        .with_constraints(FieldConstraints::new().with_length_range(Some(2), Some(20))),
        required_toggle(true),
        FieldRule::boolean("allowMultiple", "Allow Multiple")
            .optional()
            .with_default(false),
        FieldRule::boolean("randomizeOrder", "Randomize Order")
            .optional()
            .with_default(false),
        FieldRule::boolean("allowOther", "Allow \"Other\"")
            .optional()
            .with_default(false)
            .with_description("Adds a free-text \"Other\" choice"),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::MultipleChoice,
        display_name: "Multiple Choice".into(),
        description: "Lets participants pick one or more answers from a list".into(),
        category: BlockCategory::Input,
        icon: "list-checks".into(),
        estimated_duration_secs: 30,
        complexity: Complexity::Simple,
        requires_interaction: true,
        supported_features: features(&["required-toggle", "randomization", "multi-select", "other-option"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Feature priority",
            "",
            json!({
                "question": "Which feature matters most to you?",
                "options": ["Speed", "Price", "Design", "Support"],
                "required": true,
                "randomizeOrder": true
            }),
        )],
        validation_rule: rule,
    }
}

pub fn yes_no() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        question("Did you find what you were looking for?"),
        FieldRule::string("yesLabel", "Yes Label")
            .optional()
            .with_default("Yes")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(30))),
        FieldRule::string("noLabel", "No Label")
            .optional()
            .with_default("No")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(30))),
        required_toggle(true),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::YesNo,
        display_name: "Yes / No".into(),
        description: "A binary question with two customizable answers".into(),
        category: BlockCategory::Input,
        icon: "toggle-left".into(),
        estimated_duration_secs: 10,
        complexity: Complexity::Simple,
        requires_interaction: true,
        supported_features: features(&["required-toggle", "custom-labels"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Task success",
            "Asked right after a navigation task",
            json!({
                "question": "Were you able to complete the task?",
                "yesLabel": "Yes, easily",
                "noLabel": "No",
                "required": true
            }),
        )],
        validation_rule: rule,
    }
}
