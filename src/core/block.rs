//! Block metadata, instances, and related types
//!
//! [`BlockMetadata`] describes a block type and lives in the registry's
//! read-only table. [`BlockInstance`] is one block placed in a study; it is
//! owned by the study definition and never retained by the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::registry::BlockRegistry;
use super::rule::SettingsRule;
use super::settings::BlockSettings;
use super::{BlockId, BlockTypeId, Settings};
use crate::categories::BlockCategory;
use crate::runtime::validation::{FieldViolation, ValidationResult};

/// Descriptive metadata for one block type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    #[serde(rename = "type")]
    pub block_type: BlockTypeId,
    /// Name shown in the block picker
    pub display_name: String,
    pub description: String,
    pub category: BlockCategory,
    /// Icon identifier
    pub icon: String,
    /// Typical time a participant spends on the block
    #[serde(rename = "estimatedDurationSeconds")]
    pub estimated_duration_secs: u32,
    pub complexity: Complexity,
    /// Whether the participant must act before moving on
    pub requires_interaction: bool,
    pub supported_features: BTreeSet<String>,
    pub default_settings: Settings,
    pub validation_rule: SettingsRule,
    #[serde(default)]
    pub examples: Vec<BlockExample>,
}

impl BlockMetadata {
    pub fn supports(&self, feature: &str) -> bool {
        self.supported_features.contains(feature)
    }
}

/// A named sample settings object for documentation and previews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockExample {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub settings: Settings,
}

/// How demanding a block is for participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block placed in a study definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstance {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockTypeId,
    /// Position within the study; uniqueness is up to the caller
    pub order: u32,
    pub title: String,
    pub description: String,
    pub settings: Settings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlockInstance {
    /// Stamp `updated_at` with the current time
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Re-run settings validation, e.g. before saving an edited block
    pub fn revalidate(&self, registry: &BlockRegistry) -> ValidationResult {
        registry.validate(self.block_type.as_str(), &serde_json::Value::Object(self.settings.clone()))
    }

    /// Decode the settings into the concrete record for this block type
    pub fn typed_settings(&self) -> Result<BlockSettings, BlockError> {
        BlockSettings::decode(self.block_type, &self.settings)
    }
}

/// Caller-supplied instance fields for [`BlockRegistry::create_block_with`]
#[derive(Debug, Clone, Default)]
pub struct BlockOptions {
    /// Keep this id instead of generating one
    pub id: Option<BlockId>,
    pub order: u32,
    /// Overrides the type's display name
    pub title: Option<String>,
    /// Overrides the type's description
    pub description: Option<String>,
}

impl BlockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A block as read back from a document store
///
/// Nothing about it is trusted: the type may be one this build does not know
/// and the settings may be any JSON value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<BlockInstance> for StoredBlock {
    fn from(instance: BlockInstance) -> Self {
        Self {
            id: Some(instance.id.0),
            block_type: instance.block_type.as_str().to_string(),
            order: instance.order,
            title: Some(instance.title),
            description: Some(instance.description),
            settings: serde_json::Value::Object(instance.settings),
            created_at: Some(instance.created_at),
            updated_at: Some(instance.updated_at),
        }
    }
}

/// Anything that names a block type, known or not
///
/// Study-level aggregates accept any iterator of these so they run over
/// created instances and raw stored documents alike.
pub trait BlockTypeRef {
    fn type_id(&self) -> &str;
}

impl BlockTypeRef for BlockInstance {
    fn type_id(&self) -> &str {
        self.block_type.as_str()
    }
}

impl BlockTypeRef for StoredBlock {
    fn type_id(&self) -> &str {
        &self.block_type
    }
}

/// A raw stored document; a missing or non-string `type` reads as `""`,
/// which no registry knows.
impl BlockTypeRef for serde_json::Value {
    fn type_id(&self) -> &str {
        self.get("type").and_then(serde_json::Value::as_str).unwrap_or("")
    }
}

impl BlockTypeRef for BlockTypeId {
    fn type_id(&self) -> &str {
        self.as_str()
    }
}

impl BlockTypeRef for str {
    fn type_id(&self) -> &str {
        self
    }
}

impl BlockTypeRef for String {
    fn type_id(&self) -> &str {
        self
    }
}

impl<T: BlockTypeRef + ?Sized> BlockTypeRef for &T {
    fn type_id(&self) -> &str {
        (**self).type_id()
    }
}

/// Block errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// The type id is not in the registry
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    /// Settings do not satisfy the type's rule
    #[error("Invalid settings for {block_type}: {}", join_violations(.violations))]
    InvalidSettings {
        block_type: String,
        violations: Vec<FieldViolation>,
    },

    /// Validated settings could not be decoded into the typed record
    #[error("Settings decode failed: {0}")]
    Decode(String),
}

impl BlockError {
    /// Field-level violations, empty for anything but `InvalidSettings`
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            BlockError::InvalidSettings { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
