//! Study Blocks - Block registry for the study builder
//!
//! This crate provides the catalog of block types a study can be assembled
//! from, the rule language their settings are checked against, and the
//! registry that creates, restores, and summarizes block instances.

pub mod api;
pub mod categories;
pub mod config;
pub mod core;
pub mod runtime;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use crate::categories::BlockCategory;
pub use crate::config::RegistryConfig;
pub use crate::core::{BlockError, BlockId, BlockInstance, BlockMetadata, BlockRegistry, BlockTypeId, Settings};
pub use crate::runtime::{StudySummary, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
