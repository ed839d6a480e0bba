//! Completion blocks

use serde_json::json;

use super::{example, features, BlockCategory};
use crate::core::block::{BlockMetadata, Complexity};
use crate::core::rule::{FieldConstraints, FieldRule, FieldUiHint, SettingsRule, WidgetType};
use crate::core::BlockTypeId;

pub fn thank_you() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        FieldRule::string("title", "Title")
            .with_default("Thank you!")
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(200))),
        FieldRule::string("message", "Message")
            .with_default("Your responses have been recorded.")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(2000)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
        FieldRule::string("redirectUrl", "Redirect URL")
            .optional()
            .with_default("")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(2048)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Input).with_help_text("Leave empty to stay on this screen")),
        FieldRule::boolean("showSocialShare", "Show Share Buttons")
            .optional()
            .with_default(false),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::ThankYou,
        display_name: "Thank You".into(),
        description: "Closes the study and optionally redirects participants".into(),
        category: BlockCategory::Completion,
        icon: "party-popper".into(),
        estimated_duration_secs: 5,
        complexity: Complexity::Simple,
        requires_interaction: false,
        supported_features: features(&["redirect", "branding"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Panel redirect",
            "Sends participants back to the recruitment panel",
            json!({
                "title": "All done!",
                "message": "You will now be redirected to collect your reward.",
                "redirectUrl": "https://panel.example.com/complete?code=XYZ"
            }),
        )],
        validation_rule: rule,
    }
}
