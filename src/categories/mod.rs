//! Block categories and the builtin block table
//!
//! Each submodule defines the block types of one category. Together they
//! form the literal table the registry is built from.

pub mod completion;
pub mod display;
pub mod input;
pub mod interaction;
pub mod media;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::core::block::{BlockExample, BlockMetadata};
use crate::core::Settings;

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    /// Screens that only show content (welcome, context)
    Display,
    /// Questions answered by typing or picking
    Input,
    /// Task-based research methods (card sort, tree test)
    Interaction,
    /// Participant uploads
    Media,
    /// End-of-study screens
    Completion,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 5] = [
        BlockCategory::Display,
        BlockCategory::Input,
        BlockCategory::Interaction,
        BlockCategory::Media,
        BlockCategory::Completion,
    ];

    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockCategory::Display => "Display",
            BlockCategory::Input => "Input",
            BlockCategory::Interaction => "Interaction",
            BlockCategory::Media => "Media",
            BlockCategory::Completion => "Completion",
        }
    }

    /// Wire identifier, e.g. `"input"`
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Display => "display",
            BlockCategory::Input => "input",
            BlockCategory::Interaction => "interaction",
            BlockCategory::Media => "media",
            BlockCategory::Completion => "completion",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// All builtin block definitions, in block type declaration order
pub fn builtin_definitions() -> Vec<BlockMetadata> {
    vec![
        display::welcome_screen(),
        input::open_question(),
        input::opinion_scale(),
        input::simple_input(),
        input::multiple_choice(),
        display::context_screen(),
        input::yes_no(),
        interaction::five_second_test(),
        interaction::card_sort(),
        interaction::tree_test(),
        completion::thank_you(),
        media::image_upload(),
        media::file_upload(),
    ]
}

// ---------------------------------------------------------------------------
// Table helpers
// ---------------------------------------------------------------------------

fn features(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// Unwrap a `json!` object literal into a settings map
fn settings(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        _ => Settings::new(),
    }
}

fn example(name: &str, description: &str, value: Value) -> BlockExample {
    BlockExample {
        name: name.into(),
        description: description.into(),
        settings: settings(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockTypeId;
    use crate::runtime::validation::SettingsValidator;

    #[test]
    fn table_follows_declaration_order() {
        let types: Vec<_> = builtin_definitions().iter().map(|d| d.block_type).collect();
        assert_eq!(types, BlockTypeId::ALL.to_vec());
    }

    #[test]
    fn every_example_satisfies_its_rule() {
        for def in builtin_definitions() {
            assert!(!def.examples.is_empty(), "{} has no examples", def.block_type);
            for ex in &def.examples {
                let result = SettingsValidator::validate(&def.validation_rule, &Value::Object(ex.settings.clone()));
                assert!(result.is_valid(), "{} example '{}': {:?}", def.block_type, ex.name, result.errors);
            }
        }
    }

    #[test]
    fn every_category_is_populated() {
        let defs = builtin_definitions();
        for category in BlockCategory::ALL {
            assert!(defs.iter().any(|d| d.category == category), "{} is empty", category);
        }
    }

    #[test]
    fn category_display_and_wire_names() {
        assert_eq!(BlockCategory::Interaction.to_string(), "Interaction");
        assert_eq!(serde_json::to_value(BlockCategory::Media).unwrap(), serde_json::json!("media"));
        assert_eq!(BlockCategory::Completion.as_str(), "completion");
    }
}
