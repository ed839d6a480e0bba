//! Core block abstractions and types
//!
//! This module defines the closed set of block types, the metadata and
//! instance structures built on top of them, the settings rule language, and
//! the registry that ties them together.

pub mod block;
pub mod registry;
pub mod rule;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub use block::{
    BlockError, BlockExample, BlockInstance, BlockMetadata, BlockOptions, BlockTypeRef, Complexity,
    StoredBlock,
};
pub use registry::{BlockRegistry, RegistryError};
pub use rule::{FieldConstraints, FieldKind, FieldRule, SettingsRule};
pub use settings::BlockSettings;

/// A settings payload as it crosses the external-input boundary.
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Identifier of one of the supported block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockTypeId {
    WelcomeScreen,
    OpenQuestion,
    OpinionScale,
    SimpleInput,
    MultipleChoice,
    ContextScreen,
    YesNo,
    FiveSecondTest,
    CardSort,
    TreeTest,
    ThankYou,
    ImageUpload,
    FileUpload,
}

impl BlockTypeId {
    /// Number of block types
    pub const COUNT: usize = 13;

    /// Every block type, in declaration order
    pub const ALL: [BlockTypeId; Self::COUNT] = [
        BlockTypeId::WelcomeScreen,
        BlockTypeId::OpenQuestion,
        BlockTypeId::OpinionScale,
        BlockTypeId::SimpleInput,
        BlockTypeId::MultipleChoice,
        BlockTypeId::ContextScreen,
        BlockTypeId::YesNo,
        BlockTypeId::FiveSecondTest,
        BlockTypeId::CardSort,
        BlockTypeId::TreeTest,
        BlockTypeId::ThankYou,
        BlockTypeId::ImageUpload,
        BlockTypeId::FileUpload,
    ];

    /// The wire identifier, e.g. `"multiple-choice"`
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTypeId::WelcomeScreen => "welcome-screen",
            BlockTypeId::OpenQuestion => "open-question",
            BlockTypeId::OpinionScale => "opinion-scale",
            BlockTypeId::SimpleInput => "simple-input",
            BlockTypeId::MultipleChoice => "multiple-choice",
            BlockTypeId::ContextScreen => "context-screen",
            BlockTypeId::YesNo => "yes-no",
            BlockTypeId::FiveSecondTest => "five-second-test",
            BlockTypeId::CardSort => "card-sort",
            BlockTypeId::TreeTest => "tree-test",
            BlockTypeId::ThankYou => "thank-you",
            BlockTypeId::ImageUpload => "image-upload",
            BlockTypeId::FileUpload => "file-upload",
        }
    }

    /// Position in [`BlockTypeId::ALL`]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlockTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockTypeId {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockTypeId::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BlockError::UnknownBlockType(s.to_string()))
    }
}

impl AsRef<str> for BlockTypeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Opaque identifier of a block instance
///
/// Generated ids are UUID v4 strings. Ids read back from stored studies are
/// kept verbatim, whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}
