//! Display blocks
//!
//! Screens that present content without collecting an answer: the study
//! introduction and scenario context shown before a task.

use serde_json::json;

use super::{example, features, BlockCategory};
use crate::core::block::{BlockMetadata, Complexity};
use crate::core::rule::{FieldConstraints, FieldRule, FieldUiHint, SettingsRule, WidgetType};
use crate::core::BlockTypeId;

pub fn welcome_screen() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        FieldRule::string("title", "Title")
            .with_default("Welcome to our study")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(200)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Input)),
        FieldRule::string("message", "Message")
            .with_default("Thank you for taking part. Your feedback helps us build better products.")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(2000)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
        FieldRule::string("buttonText", "Button Text")
            .optional()
            .with_default("Start")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(50))),
        FieldRule::boolean("showLogo", "Show Logo")
            .optional()
            .with_default(true)
            .with_description("Display the workspace logo above the title"),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::WelcomeScreen,
        display_name: "Welcome Screen".into(),
        description: "Greets participants and explains what the study is about".into(),
        category: BlockCategory::Display,
        icon: "hand-wave".into(),
        estimated_duration_secs: 10,
        complexity: Complexity::Simple,
        requires_interaction: false,
        supported_features: features(&["branding", "rich-text"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Product feedback intro",
            "Short welcome for a product feedback survey",
            json!({
                "title": "Help us improve Checkout",
                "message": "This survey takes about five minutes.",
                "buttonText": "Let's go"
            }),
        )],
        validation_rule: rule,
    }
}

pub fn context_screen() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        FieldRule::string("title", "Title")
            .with_default("Before you begin")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(200))),
        FieldRule::string("content", "Content")
            .with_default("Imagine you are shopping for a new laptop.")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(5000)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Textarea).with_help_text("Supports markdown")),
        FieldRule::string("buttonText", "Button Text")
            .optional()
            .with_default("Continue")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(50))),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::ContextScreen,
        display_name: "Context Screen".into(),
        description: "Sets the scene or gives instructions before the next task".into(),
        category: BlockCategory::Display,
        icon: "info".into(),
        estimated_duration_secs: 15,
        complexity: Complexity::Simple,
        requires_interaction: false,
        supported_features: features(&["rich-text", "scenario"]),
        default_settings: rule.defaults(),
        examples: vec![
            example(
                "Shopping scenario",
                "",
                json!({
                    "title": "Your task",
                    "content": "You want to buy a gift for a friend under $50."
                }),
            ),
            example(
                "Instructions",
                "Explains how the next tasks work",
                json!({
                    "title": "How this works",
                    "content": "There are no right or wrong answers. Think aloud as you go.",
                    "buttonText": "Got it"
                }),
            ),
        ],
        validation_rule: rule,
    }
}
