#![allow(clippy::result_large_err)] // Workflow APIs return AppError to preserve structured context without boxing.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Exported automation workflow: a named graph of typed nodes plus their
/// connection table. Fields the schema does not model are carried through
/// `extra` so a redacted copy re-serializes without losing anything.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One step in a workflow. `parameters` is an arbitrarily nested JSON tree
/// and is the only part of a node the sanitizer rewrites.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(rename = "typeVersion")]
    pub type_version: Number,
    pub position: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<IndexMap<String, CredentialRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to a stored credential. Holds no secret material, only the
/// vault identifier and display name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialRef {
    pub id: String,
    pub name: String,
}

/// Parse UTF-8 JSON content into a [`Workflow`].
pub fn parse_workflow(content: &str) -> Result<Workflow, AppError> {
    serde_json::from_str(content).map_err(|e| {
        AppError::new(
            ErrorCategory::ParseError,
            format!("input is not valid workflow JSON: {}", e),
        )
    })
}

/// Serialize a workflow back to pretty-printed JSON for the redacted artifact.
pub fn serialize_workflow(workflow: &Workflow) -> Result<String, AppError> {
    serde_json::to_string_pretty(workflow).map_err(|e| {
        AppError::new(
            ErrorCategory::InternalError,
            format!("failed to serialize workflow: {}", e),
        )
    })
}
