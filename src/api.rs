//! JSON facade over the global registry
//!
//! String-in, string-out calls for hosts that exchange JSON with the study
//! builder (the WASM bindings wrap these one-to-one). Every call answers with
//! a JSON document; failures come back as an `{"error": ...}` payload instead
//! of a panic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::block::{BlockError, BlockOptions};
use crate::core::registry::BlockRegistry;
use crate::core::{BlockId, Settings};
use crate::runtime::summary::StudySummary;
use crate::runtime::validation::{ValidationIssue, ValidationResult};

// ── Request types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBlockRequest {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    order: u32,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<IssueResponse>,
}

#[derive(Serialize)]
struct ValidationResponse {
    valid: bool,
    errors: Vec<IssueResponse>,
}

#[derive(Serialize)]
struct IssueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockTypeInfo {
    #[serde(rename = "type")]
    block_type: String,
    display_name: String,
    description: String,
    category: String,
    icon: String,
    estimated_duration_seconds: u32,
    complexity: String,
}

impl From<&ValidationIssue> for IssueResponse {
    fn from(issue: &ValidationIssue) -> Self {
        match issue {
            ValidationIssue::Field(v) => IssueResponse {
                field: Some(v.field.clone()),
                message: format!("{} (got {})", v.expected, v.actual),
            },
            other => IssueResponse {
                field: None,
                message: other.to_string(),
            },
        }
    }
}

impl From<&ValidationResult> for ValidationResponse {
    fn from(result: &ValidationResult) -> Self {
        Self {
            valid: result.valid,
            errors: result.errors.iter().map(IssueResponse::from).collect(),
        }
    }
}

const SERIALIZATION_FAILED: &str = r#"{"error":"serialization failed"}"#;

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(format!("Serialization failed: {}", e)))
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse {
        error: msg.into(),
        violations: Vec::new(),
    })
    .unwrap_or_else(|_| SERIALIZATION_FAILED.to_string())
}

fn block_error_json(err: &BlockError) -> String {
    let violations = err
        .violations()
        .iter()
        .map(|v| IssueResponse::from(&ValidationIssue::Field(v.clone())))
        .collect();
    serde_json::to_string(&ErrorResponse {
        error: err.to_string(),
        violations,
    })
    .unwrap_or_else(|_| SERIALIZATION_FAILED.to_string())
}

// ── Calls ───────────────────────────────────────────────────────────────────

/// Picker summaries of every registered type, in declaration order
pub fn block_types_json() -> String {
    let infos: Vec<BlockTypeInfo> = BlockRegistry::global()
        .definitions()
        .map(|m| BlockTypeInfo {
            block_type: m.block_type.to_string(),
            display_name: m.display_name.clone(),
            description: m.description.clone(),
            category: m.category.as_str().to_string(),
            icon: m.icon.clone(),
            estimated_duration_seconds: m.estimated_duration_secs,
            complexity: m.complexity.to_string(),
        })
        .collect();
    to_json(&infos)
}

/// Full metadata for a type, or `null`
pub fn metadata_json(type_id: &str) -> String {
    to_json(&BlockRegistry::global().metadata(type_id))
}

/// Default settings for a type, or `null`
pub fn default_settings_json(type_id: &str) -> String {
    to_json(&BlockRegistry::global().default_settings(type_id))
}

/// Validate a settings document against a type's rule
pub fn validate_settings_json(type_id: &str, settings_json: &str) -> String {
    let candidate: Value = match serde_json::from_str(settings_json) {
        Ok(v) => v,
        Err(e) => return json_err(format!("Invalid settings JSON: {}", e)),
    };
    let result = BlockRegistry::global().validate(type_id, &candidate);
    to_json(&ValidationResponse::from(&result))
}

/// Create a block from a request document
///
/// The request is `{type, settings?, id?, order?, title?, description?}`.
pub fn create_block_json(request_json: &str) -> String {
    let request: CreateBlockRequest = match serde_json::from_str(request_json) {
        Ok(r) => r,
        Err(e) => return json_err(format!("Invalid request JSON: {}", e)),
    };

    let options = BlockOptions {
        id: request.id.map(BlockId::from),
        order: request.order,
        title: request.title,
        description: request.description,
    };
    match BlockRegistry::global().create_block_with(&request.block_type, request.settings, options) {
        Ok(block) => to_json(&block),
        Err(e) => block_error_json(&e),
    }
}

/// Summary over a stored block list
///
/// Only each entry's `type` is read, so a block with malformed fields the
/// summary does not use still counts. Entries without a string `type` are
/// treated as unknown types.
pub fn study_summary_json(blocks_json: &str) -> String {
    let blocks: Vec<Value> = match serde_json::from_str(blocks_json) {
        Ok(b) => b,
        Err(e) => return json_err(format!("Invalid blocks JSON: {}", e)),
    };
    to_json(&StudySummary::compute(BlockRegistry::global(), &blocks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn block_types_lists_all_in_order() {
        let types = parse(&block_types_json());
        let types = types.as_array().unwrap();
        assert_eq!(types.len(), 13);
        assert_eq!(types[0]["type"], "welcome-screen");
        assert_eq!(types[0]["displayName"], "Welcome Screen");
        assert_eq!(types[12]["type"], "file-upload");
    }

    #[test]
    fn metadata_and_defaults_are_null_for_unknown_types() {
        assert_eq!(parse(&metadata_json("heatmap")), Value::Null);
        assert_eq!(parse(&default_settings_json("heatmap")), Value::Null);

        let meta = parse(&metadata_json("opinion-scale"));
        assert_eq!(meta["type"], "opinion-scale");
        assert_eq!(meta["defaultSettings"]["scaleType"], "numeric");
    }

    #[test]
    fn validate_reports_field_messages() {
        let response = parse(&validate_settings_json(
            "multiple-choice",
            r#"{"question": "Pick", "options": ["one"], "required": true}"#,
        ));
        assert_eq!(response["valid"], false);
        assert_eq!(response["errors"][0]["field"], "options");
        assert_eq!(response["errors"][0]["message"], "must contain at least 2 items (got array)");

        let unknown = parse(&validate_settings_json("heatmap", "{}"));
        assert_eq!(unknown["valid"], false);
        assert!(unknown["errors"][0].get("field").is_none());
    }

    #[test]
    fn validate_rejects_malformed_json() {
        let response = parse(&validate_settings_json("yes-no", "{not json"));
        assert!(response["error"].as_str().unwrap().starts_with("Invalid settings JSON"));
    }

    #[test]
    fn create_block_round_trips_request_fields() {
        let block = parse(&create_block_json(
            &json!({"type": "yes-no", "id": "b-1", "order": 2, "settings": {"question": "Ready?"}}).to_string(),
        ));
        assert_eq!(block["id"], "b-1");
        assert_eq!(block["order"], 2);
        assert_eq!(block["settings"]["question"], "Ready?");
        assert_eq!(block["settings"]["required"], true);
    }

    #[test]
    fn create_block_reports_violations() {
        let response = parse(&create_block_json(
            &json!({"type": "file-upload", "settings": {"maxFileSize": 200_000_000}}).to_string(),
        ));
        assert_eq!(response["violations"][0]["field"], "maxFileSize");

        let unknown = parse(&create_block_json(r#"{"type": "heatmap"}"#));
        assert_eq!(unknown["error"], "Unknown block type: heatmap");
        assert!(unknown.get("violations").is_none());
    }

    #[test]
    fn summary_over_stored_blocks() {
        let summary = parse(&study_summary_json(
            r#"[{"type": "welcome-screen"}, {"type": "heatmap"}, {"type": "thank-you"}]"#,
        ));
        assert_eq!(summary["totalBlocks"], 3);
        assert_eq!(summary["estimatedDurationSecs"], 45);
        assert_eq!(summary["estimatedMinutes"], 1);
        assert_eq!(summary["unknownTypes"], json!(["heatmap"]));
    }

    #[test]
    fn summary_tolerates_malformed_unused_fields() {
        let summary = parse(&study_summary_json(
            r#"[
                {"type": "welcome-screen", "order": null},
                {"type": "card-sort", "order": -1},
                {"type": "thank-you", "createdAt": {"$date": 1700000000000}},
                {"type": 7},
                {"order": 3},
                "not a block"
            ]"#,
        ));
        assert!(summary.get("error").is_none(), "{}", summary);
        assert_eq!(summary["totalBlocks"], 6);
        // 10 + 300 + 5, plus the 30 s fallback for each of the three typeless entries
        assert_eq!(summary["estimatedDurationSecs"], 405);
        assert_eq!(summary["complexity"], json!({"simple": 2, "moderate": 0, "complex": 1}));
        assert_eq!(summary["unknownTypes"], json!([]));
    }

    #[test]
    fn summary_rejects_non_list_documents() {
        let response = parse(&study_summary_json(r#"{"type": "welcome-screen"}"#));
        assert!(response["error"].as_str().unwrap().starts_with("Invalid blocks JSON"));
    }

    #[test]
    fn error_payloads_are_json() {
        let response = parse(&json_err("boom"));
        assert_eq!(response, json!({"error": "boom"}));
        assert_eq!(parse(SERIALIZATION_FAILED), json!({"error": "serialization failed"}));
    }
}
