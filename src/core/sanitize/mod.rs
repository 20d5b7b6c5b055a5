#![allow(clippy::result_large_err)]

pub mod patterns;
pub mod scanner;

pub use patterns::{default_patterns, SecretDetector, SecretPattern};
pub use scanner::{scan_tree, ScanMatch, MAX_SCAN_DEPTH};

use crate::core::error::AppError;
use crate::core::workflow::Workflow;
use serde::Serialize;

/// One detected secret, tagged with the node that owned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub node_name: String,
    pub node_type: String,
    pub pattern_name: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Potential {} found in node \"{}\" ({}).",
            self.pattern_name, self.node_name, self.node_type
        )
    }
}

/// A redacted workflow plus the ordered warnings produced while redacting it.
#[derive(Debug, Clone)]
pub struct SanitizationResult {
    pub workflow: Workflow,
    pub warnings: Vec<Warning>,
}

/// Produce a redacted copy of `workflow` using the built-in pattern registry.
/// The input is never mutated; the copy is structurally isomorphic to it,
/// with only string leaves inside node `parameters` rewritten. Credential
/// references are left alone. Sanitizing already-redacted output yields an
/// empty warning list.
pub fn sanitize(workflow: &Workflow) -> Result<SanitizationResult, AppError> {
    sanitize_with(workflow, default_patterns())
}

/// Like [`sanitize`] but with an explicit pattern registry.
pub fn sanitize_with(
    workflow: &Workflow,
    patterns: &[SecretPattern],
) -> Result<SanitizationResult, AppError> {
    let mut clean = workflow.clone();
    let mut warnings = Vec::new();
    for node in &mut clean.nodes {
        if let Some(parameters) = node.parameters.as_mut() {
            for hit in scan_tree(parameters, patterns)? {
                warnings.push(Warning {
                    node_name: node.name.clone(),
                    node_type: node.node_type.clone(),
                    pattern_name: hit.pattern,
                });
            }
        }
    }
    Ok(SanitizationResult {
        workflow: clean,
        warnings,
    })
}
