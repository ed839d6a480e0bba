//! Typed settings records
//!
//! Settings travel as JSON objects so stored studies stay readable across
//! schema versions. Once a settings object has passed validation it can be
//! decoded into the concrete record for its block type. Optional fields are
//! `Option`s; unknown keys are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::block::BlockError;
use super::{BlockTypeId, Settings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeScreenSettings {
    pub title: String,
    pub message: String,
    pub button_text: Option<String>,
    pub show_logo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenQuestionSettings {
    pub question: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub max_length: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Numeric,
    Stars,
    Emoji,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpinionScaleSettings {
    pub question: String,
    pub scale_type: ScaleType,
    pub min_value: u32,
    pub max_value: u32,
    pub min_label: Option<String>,
    pub max_label: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInputSettings {
    pub question: String,
    pub input_type: InputType,
    pub placeholder: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceSettings {
    pub question: String,
    pub options: Vec<String>,
    pub required: bool,
    pub allow_multiple: Option<bool>,
    pub randomize_order: Option<bool>,
    pub allow_other: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextScreenSettings {
    pub title: String,
    pub content: String,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YesNoSettings {
    pub question: String,
    pub yes_label: Option<String>,
    pub no_label: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveSecondTestSettings {
    pub instruction: String,
    pub image_url: Option<String>,
    pub duration_seconds: u32,
    pub follow_up_questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Open,
    Closed,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSortSettings {
    pub instruction: String,
    pub sort_type: SortType,
    pub cards: Vec<String>,
    pub categories: Option<Vec<String>>,
    pub randomize_cards: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeTestSettings {
    pub task: String,
    pub tree: Vec<String>,
    pub correct_paths: Option<Vec<String>>,
    pub allow_skip: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouSettings {
    pub title: String,
    pub message: String,
    pub redirect_url: Option<String>,
    pub show_social_share: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadSettings {
    pub instruction: String,
    pub max_images: Option<u32>,
    pub max_file_size: Option<u64>,
    pub required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadSettings {
    pub instruction: String,
    pub max_file_size: Option<u64>,
    pub allowed_types: Option<Vec<String>>,
    pub max_files: Option<u32>,
    pub required: Option<bool>,
}

/// Settings of any block, keyed by block type
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSettings {
    WelcomeScreen(WelcomeScreenSettings),
    OpenQuestion(OpenQuestionSettings),
    OpinionScale(OpinionScaleSettings),
    SimpleInput(SimpleInputSettings),
    MultipleChoice(MultipleChoiceSettings),
    ContextScreen(ContextScreenSettings),
    YesNo(YesNoSettings),
    FiveSecondTest(FiveSecondTestSettings),
    CardSort(CardSortSettings),
    TreeTest(TreeTestSettings),
    ThankYou(ThankYouSettings),
    ImageUpload(ImageUploadSettings),
    FileUpload(FileUploadSettings),
}

impl BlockSettings {
    /// Decode a settings object that has already passed validation
    ///
    /// # Errors
    /// Returns [`BlockError::Decode`] if the object does not fit the record,
    /// which only happens for settings that were never validated.
    pub fn decode(block_type: BlockTypeId, settings: &Settings) -> Result<Self, BlockError> {
        Ok(match block_type {
            BlockTypeId::WelcomeScreen => BlockSettings::WelcomeScreen(decode_record(settings)?),
            BlockTypeId::OpenQuestion => BlockSettings::OpenQuestion(decode_record(settings)?),
            BlockTypeId::OpinionScale => BlockSettings::OpinionScale(decode_record(settings)?),
            BlockTypeId::SimpleInput => BlockSettings::SimpleInput(decode_record(settings)?),
            BlockTypeId::MultipleChoice => BlockSettings::MultipleChoice(decode_record(settings)?),
            BlockTypeId::ContextScreen => BlockSettings::ContextScreen(decode_record(settings)?),
            BlockTypeId::YesNo => BlockSettings::YesNo(decode_record(settings)?),
            BlockTypeId::FiveSecondTest => BlockSettings::FiveSecondTest(decode_record(settings)?),
            BlockTypeId::CardSort => BlockSettings::CardSort(decode_record(settings)?),
            BlockTypeId::TreeTest => BlockSettings::TreeTest(decode_record(settings)?),
            BlockTypeId::ThankYou => BlockSettings::ThankYou(decode_record(settings)?),
            BlockTypeId::ImageUpload => BlockSettings::ImageUpload(decode_record(settings)?),
            BlockTypeId::FileUpload => BlockSettings::FileUpload(decode_record(settings)?),
        })
    }

    pub fn block_type(&self) -> BlockTypeId {
        match self {
            BlockSettings::WelcomeScreen(_) => BlockTypeId::WelcomeScreen,
            BlockSettings::OpenQuestion(_) => BlockTypeId::OpenQuestion,
            BlockSettings::OpinionScale(_) => BlockTypeId::OpinionScale,
            BlockSettings::SimpleInput(_) => BlockTypeId::SimpleInput,
            BlockSettings::MultipleChoice(_) => BlockTypeId::MultipleChoice,
            BlockSettings::ContextScreen(_) => BlockTypeId::ContextScreen,
            BlockSettings::YesNo(_) => BlockTypeId::YesNo,
            BlockSettings::FiveSecondTest(_) => BlockTypeId::FiveSecondTest,
            BlockSettings::CardSort(_) => BlockTypeId::CardSort,
            BlockSettings::TreeTest(_) => BlockTypeId::TreeTest,
            BlockSettings::ThankYou(_) => BlockTypeId::ThankYou,
            BlockSettings::ImageUpload(_) => BlockTypeId::ImageUpload,
            BlockSettings::FileUpload(_) => BlockTypeId::FileUpload,
        }
    }
}

fn decode_record<T: DeserializeOwned>(settings: &Settings) -> Result<T, BlockError> {
    serde_json::from_value(serde_json::Value::Object(settings.clone())).map_err(|e| BlockError::Decode(e.to_string()))
}
