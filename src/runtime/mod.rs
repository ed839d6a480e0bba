//! Rule evaluation and study aggregates
//!
//! This module holds the settings validation engine and the study-level
//! statistics computed over a list of blocks.

pub mod summary;
pub mod validation;

pub use summary::{ComplexityHistogram, StudySummary};
pub use validation::{SettingsValidator, ValidationIssue, ValidationResult};
