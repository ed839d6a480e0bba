//! Media blocks
//!
//! Participant uploads. Size limits are in bytes.

use serde_json::json;

use super::{example, features, BlockCategory};
use crate::core::block::{BlockMetadata, Complexity};
use crate::core::rule::{ElementRule, FieldConstraints, FieldRule, FieldUiHint, SettingsRule, WidgetType};
use crate::core::BlockTypeId;

const MIB: i64 = 1024 * 1024;

/// Largest accepted value for an image upload's `maxFileSize`
pub const MAX_IMAGE_BYTES: i64 = 20 * MIB;
/// Largest accepted value for a file upload's `maxFileSize`
pub const MAX_FILE_BYTES: i64 = 100 * MIB;

fn max_file_size(limit: i64, default: i64) -> FieldRule {
    FieldRule::number("maxFileSize", "Max File Size")
        .optional()
        .with_default(default)
        .with_constraints(FieldConstraints::new().with_int_range(1, limit))
        .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(MIB as f64).with_unit("bytes"))
}

fn instruction(default: &str) -> FieldRule {
    FieldRule::string("instruction", "Instruction")
        .with_default(default)
        .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(1000)))
        .with_ui_hint(FieldUiHint::new(WidgetType::Textarea))
}

pub fn image_upload() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        instruction("Upload a screenshot of your workspace."),
        FieldRule::number("maxImages", "Max Images")
            .optional()
            .with_default(1)
            .with_constraints(FieldConstraints::new().with_int_range(1, 10)),
        max_file_size(MAX_IMAGE_BYTES, 5 * MIB),
        FieldRule::boolean("required", "Required").optional().with_default(true),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::ImageUpload,
        display_name: "Image Upload".into(),
        description: "Collects photos or screenshots from participants".into(),
        category: BlockCategory::Media,
        icon: "image".into(),
        estimated_duration_secs: 60,
        complexity: Complexity::Moderate,
        requires_interaction: true,
        supported_features: features(&["upload", "image", "required-toggle", "media"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Desk setup",
            "Diary-study style photo prompt",
            json!({
                "instruction": "Share a photo of where you usually work.",
                "maxImages": 3,
                "maxFileSize": 10 * MIB
            }),
        )],
        validation_rule: rule,
    }
}

pub fn file_upload() -> BlockMetadata {
    let rule = SettingsRule::new(vec![
        instruction("Upload the requested file."),
        max_file_size(MAX_FILE_BYTES, 10 * MIB),
        FieldRule::array(
            "allowedTypes",
            "Allowed Types",
            ElementRule::string().with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(100))),
        )
        .optional()
        .with_default(json!(["application/pdf", "image/png", "image/jpeg"]))
        .with_constraints(FieldConstraints::new().with_length_range(None, Some(20)))
        .with_description("MIME types; empty accepts anything"),
        FieldRule::number("maxFiles", "Max Files")
            .optional()
            .with_default(1)
            .with_constraints(FieldConstraints::new().with_int_range(1, 10)),
        FieldRule::boolean("required", "Required").optional().with_default(true),
    ]);

    BlockMetadata {
        block_type: BlockTypeId::FileUpload,
        display_name: "File Upload".into(),
        description: "Collects documents or other files from participants".into(),
        category: BlockCategory::Media,
        icon: "paperclip".into(),
        estimated_duration_secs: 90,
        complexity: Complexity::Moderate,
        requires_interaction: true,
        supported_features: features(&["upload", "file-type-filter", "required-toggle", "media"]),
        default_settings: rule.defaults(),
        examples: vec![example(
            "Resume upload",
            "",
            json!({
                "instruction": "Attach your resume as a PDF.",
                "maxFileSize": 5 * MIB,
                "allowedTypes": ["application/pdf"],
                "maxFiles": 1,
                "required": true
            }),
        )],
        validation_rule: rule,
    }
}
