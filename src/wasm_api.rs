//! WASM API: `#[wasm_bindgen]` exports for the study builder frontend.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init`: installs the panic hook
//! - `get_block_types` / `get_block_metadata` / `get_default_settings`: discovery
//! - `validate_settings` / `create_block`: editing
//! - `get_study_summary`: study overview
//!
//! Every export takes and returns JSON strings; see [`crate::api`].

use wasm_bindgen::prelude::*;

use crate::api;

#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    api::block_types_json()
}

#[wasm_bindgen]
pub fn get_block_metadata(type_id: &str) -> String {
    api::metadata_json(type_id)
}

#[wasm_bindgen]
pub fn get_default_settings(type_id: &str) -> String {
    api::default_settings_json(type_id)
}

#[wasm_bindgen]
pub fn validate_settings(type_id: &str, settings_json: &str) -> String {
    api::validate_settings_json(type_id, settings_json)
}

#[wasm_bindgen]
pub fn create_block(request_json: &str) -> String {
    api::create_block_json(request_json)
}

#[wasm_bindgen]
pub fn get_study_summary(blocks_json: &str) -> String {
    api::study_summary_json(blocks_json)
}
