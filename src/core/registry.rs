//! Block Registry - Read-only catalog of every available block type
//!
//! This module provides the registry the study builder consults for block
//! types. It supports:
//! - Lookup by type id, category, feature tag, or search query
//! - Default settings retrieval
//! - Settings validation
//! - Block instance creation and restoration from stored documents
//! - Study-level aggregates (estimated duration, complexity histogram)
//!
//! The table is immutable after construction, so a registry can be shared
//! across threads and cloned freely.

use chrono::Utc;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use super::block::{
    BlockError, BlockInstance, BlockMetadata, BlockOptions, BlockTypeRef, Complexity, StoredBlock,
};
use super::{BlockId, BlockTypeId, Settings};
use crate::categories::{builtin_definitions, BlockCategory};
use crate::config::RegistryConfig;
use crate::runtime::summary::ComplexityHistogram;
use crate::runtime::validation::{SettingsValidator, ValidationResult};

static GLOBAL: LazyLock<BlockRegistry> = LazyLock::new(|| BlockRegistry::builtin(RegistryConfig::default()));

/// Block registry
///
/// Definitions live behind an `Arc`, so clones share one table. Lookup by
/// [`BlockTypeId`] goes through a fixed index array.
#[derive(Clone)]
pub struct BlockRegistry {
    definitions: Arc<[BlockMetadata]>,
    index: [Option<usize>; BlockTypeId::COUNT],
    config: RegistryConfig,
}

impl BlockRegistry {
    /// Process-wide registry over the builtin table, built on first use
    ///
    /// # Example
    /// ```
    /// use study_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::global();
    /// assert_eq!(registry.count(), 13);
    /// ```
    pub fn global() -> &'static BlockRegistry {
        &GLOBAL
    }

    /// A fresh registry over the builtin table
    pub fn builtin(config: RegistryConfig) -> Self {
        let registry = Self::assemble(builtin_definitions(), config);
        tracing::info!(block_types = registry.count(), "block registry built");
        registry
    }

    /// Build a registry from custom definitions
    ///
    /// # Returns
    /// * `Ok(BlockRegistry)` if every definition is accepted
    /// * `Err(RegistryError)` on a duplicate type id or an inconsistent definition
    ///
    /// # Example
    /// ```
    /// use study_blocks::categories::input;
    /// use study_blocks::config::RegistryConfig;
    /// use study_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::from_definitions(
    ///     vec![input::yes_no(), input::open_question()],
    ///     RegistryConfig::default(),
    /// ).unwrap();
    /// assert_eq!(registry.count(), 2);
    /// ```
    pub fn from_definitions(definitions: Vec<BlockMetadata>, config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.block_type) {
                return Err(RegistryError::DuplicateBlockType(def.block_type.to_string()));
            }
            if config.verify_definitions {
                Self::validate_definition(def)?;
            }
        }
        Ok(Self::assemble(definitions, config))
    }

    fn assemble(definitions: Vec<BlockMetadata>, config: RegistryConfig) -> Self {
        let mut index = [None; BlockTypeId::COUNT];
        for (pos, def) in definitions.iter().enumerate() {
            index[def.block_type.index()] = Some(pos);
        }
        Self {
            definitions: definitions.into(),
            index,
            config,
        }
    }

    /// Validate a definition before it enters the table
    fn validate_definition(def: &BlockMetadata) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidDefinition {
            block_type: def.block_type.to_string(),
            reason,
        };

        if def.display_name.trim().is_empty() {
            return Err(invalid("display name cannot be empty".into()));
        }
        if def.estimated_duration_secs == 0 {
            return Err(invalid("estimated duration must be positive".into()));
        }

        let mut names = HashSet::new();
        for field in &def.validation_rule.fields {
            if !names.insert(field.name.as_str()) {
                return Err(invalid(format!("field '{}' is declared twice", field.name)));
            }
        }

        let defaults = SettingsValidator::validate_settings(&def.validation_rule, &def.default_settings);
        if let Some(issue) = defaults.errors.first() {
            return Err(invalid(format!("default settings fail their own rule: {}", issue)));
        }

        for example in &def.examples {
            let result = SettingsValidator::validate_settings(&def.validation_rule, &example.settings);
            if let Some(issue) = result.errors.first() {
                return Err(invalid(format!("example '{}' fails its rule: {}", example.name, issue)));
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -- Lookup --------------------------------------------------------------

    /// Metadata for a known type
    pub fn get(&self, block_type: BlockTypeId) -> Option<&BlockMetadata> {
        self.index[block_type.index()].map(|pos| &self.definitions[pos])
    }

    /// Metadata for a type id from untrusted input
    ///
    /// Absence is a normal outcome: stored studies may name types this build
    /// does not know.
    pub fn metadata(&self, type_id: &str) -> Option<&BlockMetadata> {
        type_id.parse::<BlockTypeId>().ok().and_then(|t| self.get(t))
    }

    /// Registered types, in declaration order
    pub fn all_types(&self) -> Vec<BlockTypeId> {
        BlockTypeId::ALL
            .iter()
            .copied()
            .filter(|t| self.index[t.index()].is_some())
            .collect()
    }

    /// Registered definitions, in declaration order
    pub fn definitions(&self) -> impl Iterator<Item = &BlockMetadata> {
        self.all_types().into_iter().filter_map(move |t| self.get(t))
    }

    /// An owned copy of a type's default settings
    pub fn default_settings(&self, type_id: &str) -> Option<Settings> {
        self.metadata(type_id).map(|m| m.default_settings.clone())
    }

    pub fn by_category(&self, category: BlockCategory) -> Vec<BlockTypeId> {
        self.definitions()
            .filter(|m| m.category == category)
            .map(|m| m.block_type)
            .collect()
    }

    pub fn by_feature(&self, feature: &str) -> Vec<BlockTypeId> {
        self.definitions()
            .filter(|m| m.supports(feature))
            .map(|m| m.block_type)
            .collect()
    }

    /// Search for block types by query string
    ///
    /// Case-insensitive match on type id, display name, description, and
    /// feature tags.
    pub fn search(&self, query: &str) -> Vec<BlockTypeId> {
        let query = query.to_lowercase();

        self.definitions()
            .filter(|m| {
                m.block_type.as_str().contains(&query)
                    || m.display_name.to_lowercase().contains(&query)
                    || m.description.to_lowercase().contains(&query)
                    || m.supported_features.iter().any(|tag| tag.to_lowercase().contains(&query))
            })
            .map(|m| m.block_type)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.definitions.len()
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.metadata(type_id).is_some()
    }

    // -- Validation ----------------------------------------------------------

    /// Validate a candidate settings value for a type
    ///
    /// An unknown type is reported as a single top-level issue.
    pub fn validate(&self, type_id: &str, candidate: &Value) -> ValidationResult {
        match self.metadata(type_id) {
            Some(meta) => {
                let result = SettingsValidator::validate(&meta.validation_rule, candidate);
                if !result.valid {
                    tracing::debug!(block_type = type_id, issues = result.errors.len(), "settings rejected");
                }
                result
            }
            None => ValidationResult::unknown_type(type_id),
        }
    }

    // -- Instances -----------------------------------------------------------

    /// Create a block with default options
    ///
    /// See [`BlockRegistry::create_block_with`].
    pub fn create_block(&self, type_id: &str, overrides: Settings) -> Result<BlockInstance, BlockError> {
        self.create_block_with(type_id, overrides, BlockOptions::default())
    }

    /// Create a block instance
    ///
    /// Settings are the type's defaults shallow-merged with `overrides`; an
    /// override replaces the whole top-level value.
    ///
    /// # Returns
    /// * `Err(BlockError::UnknownBlockType)` if `type_id` is not registered
    /// * `Err(BlockError::InvalidSettings)` if the merged settings break the rule
    pub fn create_block_with(
        &self,
        type_id: &str,
        overrides: Settings,
        options: BlockOptions,
    ) -> Result<BlockInstance, BlockError> {
        let meta = self
            .metadata(type_id)
            .ok_or_else(|| BlockError::UnknownBlockType(type_id.to_string()))?;

        let mut settings = meta.default_settings.clone();
        settings.extend(overrides);

        SettingsValidator::validate_settings(&meta.validation_rule, &settings).into_result(type_id)?;

        let now = Utc::now();
        let instance = BlockInstance {
            id: options.id.unwrap_or_default(),
            block_type: meta.block_type,
            order: options.order,
            title: options.title.unwrap_or_else(|| meta.display_name.clone()),
            description: options.description.unwrap_or_else(|| meta.description.clone()),
            settings,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(block_id = %instance.id, block_type = type_id, order = instance.order, "block created");
        Ok(instance)
    }

    /// Accept a block read back from storage
    ///
    /// The stored settings are validated as-is; defaults are not filled in.
    /// Missing ids and timestamps are generated, missing title and
    /// description fall back to the type's.
    pub fn restore(&self, stored: StoredBlock) -> Result<BlockInstance, BlockError> {
        let meta = self
            .metadata(&stored.block_type)
            .ok_or_else(|| BlockError::UnknownBlockType(stored.block_type.clone()))?;

        SettingsValidator::validate(&meta.validation_rule, &stored.settings).into_result(&stored.block_type)?;
        let settings = match stored.settings {
            Value::Object(map) => map,
            _ => Settings::new(),
        };

        let created_at = stored.created_at.unwrap_or_else(Utc::now);
        let instance = BlockInstance {
            id: stored.id.map(BlockId::from).unwrap_or_default(),
            block_type: meta.block_type,
            order: stored.order,
            title: stored.title.unwrap_or_else(|| meta.display_name.clone()),
            description: stored.description.unwrap_or_else(|| meta.description.clone()),
            settings,
            created_at,
            updated_at: stored.updated_at.unwrap_or(created_at),
        };
        tracing::debug!(block_id = %instance.id, block_type = %instance.block_type, "block restored");
        Ok(instance)
    }

    // -- Aggregates ----------------------------------------------------------

    /// Total estimated seconds for a list of blocks
    ///
    /// Unknown types count as `config.fallback_duration_secs` each.
    pub fn estimated_duration<I>(&self, blocks: I) -> u64
    where
        I: IntoIterator,
        I::Item: BlockTypeRef,
    {
        blocks
            .into_iter()
            .map(|b| match self.metadata(b.type_id()) {
                Some(meta) => u64::from(meta.estimated_duration_secs),
                None => {
                    tracing::warn!(block_type = b.type_id(), "unknown block type, using fallback duration");
                    u64::from(self.config.fallback_duration_secs)
                }
            })
            .sum()
    }

    /// Count blocks per complexity tier
    ///
    /// Unknown types are skipped, unlike [`BlockRegistry::estimated_duration`]
    /// which substitutes a fallback.
    pub fn complexity_histogram<I>(&self, blocks: I) -> ComplexityHistogram
    where
        I: IntoIterator,
        I::Item: BlockTypeRef,
    {
        let mut histogram = ComplexityHistogram::default();
        for b in blocks {
            match self.metadata(b.type_id()).map(|m| m.complexity) {
                Some(Complexity::Simple) => histogram.simple += 1,
                Some(Complexity::Moderate) => histogram.moderate += 1,
                Some(Complexity::Complex) => histogram.complex += 1,
                None => tracing::warn!(block_type = b.type_id(), "unknown block type, skipped in histogram"),
            }
        }
        histogram
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin(RegistryConfig::default())
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("block_types", &self.all_types())
            .field("config", &self.config)
            .finish()
    }
}

/// Registry error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Two definitions share a type id
    #[error("Duplicate block type: {0}")]
    DuplicateBlockType(String),

    /// A definition is internally inconsistent
    #[error("Invalid definition for {block_type}: {reason}")]
    InvalidDefinition { block_type: String, reason: String },
}
