//! WASM entry points for browser use.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{CompilerError, Diagnostic};
use crate::options::CompileOptions;

/// Validate a definition JSON: parse + structural and parameter rules.
/// Returns a JSON array of error objects.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    to_js(&validate_workflow_inner(json))
}

fn validate_workflow_inner(json: &str) -> Vec<ErrorDto> {
    match crate::parse::parse(json) {
        Ok(definition) => dtos(crate::pipeline::check(&definition)),
        Err(errors) => dtos(errors),
    }
}

/// Full pipeline. `options_json` may be empty for defaults.
/// Returns `{status: "success", source, diagnostics}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn compile_workflow(json: &str, options_json: &str) -> JsValue {
    to_js(&compile_workflow_inner(json, options_json))
}

fn compile_workflow_inner(json: &str, options_json: &str) -> CompileResult {
    let options = match CompileOptions::from_json(options_json) {
        Ok(o) => o,
        Err(e) => {
            return CompileResult::Errors {
                errors: dtos(vec![CompilerError::parse(
                    "P001",
                    format!("Failed to parse compile options JSON: {}", e),
                )]),
            };
        }
    };

    match crate::pipeline::compile_json(json, &options) {
        Ok(output) => CompileResult::Success {
            source: output.source,
            diagnostics: output.diagnostics,
        },
        Err(errors) => CompileResult::Errors {
            errors: dtos(errors),
        },
    }
}

/// View graph JSON + metadata JSON → canonical definition object.
#[wasm_bindgen]
pub fn view_to_definition(view_json: &str, meta_json: &str) -> JsValue {
    to_js(&view_to_definition_inner(view_json, meta_json))
}

fn view_to_definition_inner(view_json: &str, meta_json: &str) -> ConvertResult {
    let view = match crate::parse::parse_view(view_json) {
        Ok(v) => v,
        Err(errors) => return ConvertResult::Errors { errors: dtos(errors) },
    };
    let meta = match crate::parse::parse_meta(meta_json) {
        Ok(m) => m,
        Err(errors) => return ConvertResult::Errors { errors: dtos(errors) },
    };
    ConvertResult::converted(&crate::normalize::to_canonical(&view, &meta))
}

/// Canonical definition JSON → view graph object.
#[wasm_bindgen]
pub fn definition_to_view(json: &str) -> JsValue {
    to_js(&definition_to_view_inner(json))
}

fn definition_to_view_inner(json: &str) -> ConvertResult {
    match crate::parse::parse(json) {
        Ok(definition) => ConvertResult::converted(&crate::normalize::to_view(&definition)),
        Err(errors) => ConvertResult::Errors { errors: dtos(errors) },
    }
}

/// The node palette: type key, display name, category per known kind.
#[wasm_bindgen]
pub fn node_registry() -> JsValue {
    to_js(&crate::parse::registry())
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

fn dtos(errors: Vec<CompilerError>) -> Vec<ErrorDto> {
    errors.into_iter().map(ErrorDto::from).collect()
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum CompileResult {
    Success {
        source: String,
        diagnostics: Vec<Diagnostic>,
    },
    Errors {
        errors: Vec<ErrorDto>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ConvertResult {
    Success { value: serde_json::Value },
    Errors { errors: Vec<ErrorDto> },
}

impl ConvertResult {
    fn converted<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => ConvertResult::Success { value },
            Err(e) => ConvertResult::Errors {
                errors: dtos(vec![CompilerError::parse(
                    "P001",
                    format!("Failed to serialize result: {}", e),
                )]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR: &str = r#"{
        "id": "wf", "name": "WF", "schemaVersion": "wf-dsl/1",
        "workflowConfig": { "id": "c", "key": "k", "workflowType": "Proc", "taskQueue": "Q" },
        "graph": {
            "nodes": [
                { "id": "s", "typeKey": "control.start", "name": "Start" },
                { "id": "e", "typeKey": "control.end", "name": "End" }
            ],
            "edges": [ { "id": "e1", "sourceNodeId": "s", "targetNodeId": "e" } ]
        }
    }"#;

    #[test]
    fn compile_success_shape() {
        let value = serde_json::to_value(compile_workflow_inner(LINEAR, "")).unwrap();
        assert_eq!(value["status"], "success");
        assert!(value["source"].as_str().unwrap().contains("func Proc("));
        assert_eq!(value["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn compile_errors_shape() {
        let value = serde_json::to_value(compile_workflow_inner("{", "")).unwrap();
        assert_eq!(value["status"], "errors");
        assert_eq!(value["errors"][0]["code"], "P001");
        assert_eq!(value["errors"][0]["phase"], "Parse");
    }

    #[test]
    fn bad_options_are_reported() {
        let value =
            serde_json::to_value(compile_workflow_inner(LINEAR, r#"{"branchMode": 3}"#)).unwrap();
        assert_eq!(value["status"], "errors");
    }

    #[test]
    fn validate_clean_definition() {
        assert!(validate_workflow_inner(LINEAR).is_empty());
    }

    #[test]
    fn definition_to_view_shape() {
        let value = serde_json::to_value(definition_to_view_inner(LINEAR)).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["value"]["nodes"][0]["type"], "control.start");
        assert_eq!(value["value"]["nodes"][0]["text"]["value"], "Start");
    }
}
