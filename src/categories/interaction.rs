//! Interaction blocks
//!
//! Task-based research methods: first-impression tests, card sorting for
//! information architecture, and tree testing of navigation structures.

use serde_json::json;

use super::{example, features, BlockCategory};
use crate::core::block::{BlockMetadata, Complexity};
use crate::core::rule::{ElementRule, FieldConstraints, FieldRule, FieldUiHint, SettingsRule, WidgetType};
use crate::core::BlockTypeId;

fn instruction(name: &str, label: &str, default: &str) -> FieldRule {
    FieldRule::string(name, label)
        .with_default(default)
        .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(1000)))
        .with_ui_hint(FieldUiHint::new(WidgetType::Textarea))
}

fn labels(max_chars: usize) -> ElementRule {
    ElementRule::string().with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(max_chars)))
}

pub fn five_second_test() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        instruction(
            "instruction",
            "Instruction",
            "You will see an image for five seconds. Try to remember as much as you can.",
        ),
        FieldRule::string("imageUrl", "Image URL")
            .optional()
            .with_default("")
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(2048)))
            .with_ui_hint(FieldUiHint::new(WidgetType::Input).with_help_text("Upload or paste a design to show")),
        FieldRule::number("durationSeconds", "Exposure Time")
            .with_default(5)
            .with_constraints(FieldConstraints::new().with_int_range(1, 60))
            .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(1.0).with_unit("seconds")),
        FieldRule::array("followUpQuestions", "Follow-up Questions", labels(500))
            .optional()
            .with_default(json!(["What do you remember about the page?"]))
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(10))),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::FiveSecondTest,
        display_name: "Five Second Test".into(),
        description: "Shows a design briefly and asks what participants remember".into(),
        category: BlockCategory::Interaction,
        icon: "timer".into(),
        estimated_duration_secs: 45,
        complexity: Complexity::Moderate,
        requires_interaction: true,
        supported_features: features(&["timer", "image", "first-impression", "media"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Landing page recall",
            "",
            json!({
                "instruction": "Look at this landing page.",
                "imageUrl": "https://cdn.example.com/designs/landing-v2.png",
                "durationSeconds": 5,
                "followUpQuestions": ["What is this company selling?", "Who is it for?"]
            }),
        )],
        validation_rule: rule,
    }
}

pub fn card_sort() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        instruction(
            "instruction",
            "Instruction",
            "Sort the cards into the groups that make the most sense to you.",
        ),
        FieldRule::enumeration("sortType", "Sort Type", &["open", "closed", "hybrid"])
            .with_default("open")
            .with_description("Open lets participants name groups; closed uses yours; hybrid allows both"),
        FieldRule::array("cards", "Cards", labels(200))
            .with_default(json!(["Pricing", "Support", "Documentation", "Blog"]))
            .with_constraints(FieldConstraints::new().with_length_range(Some(2), Some(100))),
        FieldRule::array("categories", "Categories", labels(100))
            .optional()
            .with_default(json!(["Product", "Company"]))
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(30))),
        FieldRule::boolean("randomizeCards", "Randomize Cards")
            .optional()
            .with_default(true),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::CardSort,
        display_name: "Card Sort".into(),
        description: "Participants group cards to reveal how they expect content to be organized".into(),
        category: BlockCategory::Interaction,
        icon: "layout-grid".into(),
        estimated_duration_secs: 300,
        complexity: Complexity::Complex,
        requires_interaction: true,
        supported_features: features(&["drag-and-drop", "randomization", "information-architecture"]),
        default_settings: rule.defaults(),
        examples: vec![
            example(
                "Closed sort",
                "Validate an existing navigation",
                json!({
                    "instruction": "Put each item where you would expect to find it.",
                    "sortType": "closed",
                    "cards": ["Invoices", "Team members", "API keys", "Plans"],
                    "categories": ["Billing", "Settings"]
                }),
            ),
            example(
                "Open sort",
                "",
                json!({
                    "instruction": "Group these topics and name each group.",
                    "sortType": "open",
                    "cards": ["Recipes", "Meal plans", "Shopping lists"]
                }),
            ),
        ],
        validation_rule: rule,
    }
}

pub fn tree_test() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        instruction("task", "Task", "Where would you go to change your password?"),
        FieldRule::array("tree", "Tree", labels(500))
            .with_default(json!(["Home", "Home/Account", "Home/Account/Security", "Home/Help"]))
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(500)))
            .with_description("Node paths separated by '/'"),
        FieldRule::array("correctPaths", "Correct Paths", labels(500))
            .optional()
            .with_default(json!(["Home/Account/Security"]))
            .with_constraints(FieldConstraints::new().with_length_range(None, Some(50))),
        FieldRule::boolean("allowSkip", "Allow Skip")
            .optional()
            .with_default(false),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::TreeTest,
        display_name: "Tree Test".into(),
        description: "Measures whether participants can find items in a text-only navigation tree".into(),
        category: BlockCategory::Interaction,
        icon: "git-branch".into(),
        estimated_duration_secs: 180,
        complexity: Complexity::Complex,
        requires_interaction: true,
        supported_features: features(&["navigation", "information-architecture", "success-tracking"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Find the refund policy",
            "",
            json!({
                "task": "You want to return a product. Where would you look?",
                "tree": ["Shop", "Shop/Orders", "Help", "Help/Returns", "Help/Shipping"],
                "correctPaths": ["Help/Returns"],
                "allowSkip": true
            }),
        )],
        validation_rule: rule,
    }
}
