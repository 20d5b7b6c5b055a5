#![allow(clippy::result_large_err)]

use crate::ai::TextGenerator;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::core::workflow::Workflow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Structured documentation synthesized by the AI collaborator for one
/// workflow. Deserialized from the camelCase JSON the prompt demands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationRecord {
    pub summary: String,
    #[serde(default)]
    pub tools_used: Vec<String>,
    #[serde(default)]
    pub credentials_required: Vec<String>,
    pub complexity_score: i64,
    #[serde(default)]
    pub usage_notes: Option<String>,
    #[serde(default)]
    pub suggested_filename: Option<String>,
}

/// Builds a bounded prompt from a sanitized workflow, calls the text
/// generator once, and parses the reply into a [`DocumentationRecord`].
/// Raw node parameters never reach the prompt.
pub struct Documenter {
    generator: Arc<dyn TextGenerator>,
    max_context_bytes: usize,
}

impl Documenter {
    pub fn new(generator: Arc<dyn TextGenerator>, max_context_bytes: usize) -> Self {
        Documenter {
            generator,
            max_context_bytes,
        }
    }

    /// Single external call per invocation. Any service failure or
    /// unparseable reply surfaces as an `AiServiceError`; no partial record
    /// is ever returned.
    pub async fn document(&self, workflow: &Workflow) -> Result<DocumentationRecord, AppError> {
        let prompt = self.build_prompt(workflow);
        let reply = self.generator.generate(&prompt).await.map_err(|e| {
            AppError::new(
                ErrorCategory::AiServiceError,
                format!("documentation request failed: {}", e),
            )
        })?;
        parse_documentation(&reply)
    }

    fn build_prompt(&self, workflow: &Workflow) -> String {
        let name = workflow.name.as_deref().unwrap_or("Untitled");
        let context = self.build_context(workflow);

        let mut prompt = String::from(
            "You are an expert in n8n workflows. Analyze the following workflow and provide a documentation summary.\n\n",
        );
        prompt.push_str(&format!("Workflow Name: {}\n\n", name));
        prompt.push_str(
            "Please return a JSON object with the following fields:\n\
             - summary: A clear, human-readable description of what this workflow does (2-3 sentences).\n\
             - toolsUsed: A list of external services/tools integrated (e.g. Google Sheets, Slack, OpenAI).\n\
             - credentialsRequired: A list of credential types needed (e.g. \"Slack API\", \"Google OAuth\").\n\
             - complexityScore: A number from 1-10 (1 = simple, 10 = extremely complex).\n\
             - usageNotes: Any specific warnings or instructions for a user deploying this.\n\
             - suggestedFilename: A concise filename (<50 chars) in the format Service_Action_Hash.json.\n\n\
             Output PURE JSON only, no markdown formatting.\n\n",
        );
        prompt.push_str("Workflow Context (JSON structure):\n");
        prompt.push_str(&context);
        prompt.push('\n');
        prompt
    }

    /// Serialize `{name, type, notes}` per node, dropping whole nodes from
    /// the tail while the payload exceeds the byte bound so what is sent
    /// stays syntactically valid JSON.
    pub fn build_context(&self, workflow: &Workflow) -> String {
        let mut summaries: Vec<Value> = workflow
            .nodes
            .iter()
            .map(|node| {
                serde_json::json!({
                    "name": node.name,
                    "type": node.node_type,
                    "notes": node.notes,
                })
            })
            .collect();

        loop {
            let rendered = serde_json::json!({ "nodes": summaries }).to_string();
            if rendered.len() <= self.max_context_bytes || summaries.is_empty() {
                if summaries.len() < workflow.nodes.len() {
                    tracing::debug!(
                        "context truncated to {} of {} nodes",
                        summaries.len(),
                        workflow.nodes.len()
                    );
                }
                return rendered;
            }
            summaries.pop();
        }
    }
}

/// Parse the generator's reply into a record, tolerating fenced code blocks
/// around the JSON body.
pub fn parse_documentation(reply: &str) -> Result<DocumentationRecord, AppError> {
    let stripped = reply.replace("```json", "").replace("```", "");
    serde_json::from_str(stripped.trim()).map_err(|e| {
        AppError::new(
            ErrorCategory::AiServiceError,
            format!("documentation response is not valid JSON: {}", e),
        )
    })
}

/// Render a record as the Markdown artifact written beside the redacted copy.
pub fn render_markdown(record: &DocumentationRecord) -> String {
    format!(
        "# {}\n\n## Tools\n{}\n\n## Credentials\n{}\n\n## Notes\n{}",
        record.summary,
        record.tools_used.join(", "),
        record.credentials_required.join(", "),
        record
            .usage_notes
            .as_deref()
            .unwrap_or("No specific notes."),
    )
}
