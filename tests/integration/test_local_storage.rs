use async_trait::async_trait;
use flowdoc::ai::{GeneratorError, TextGenerator};
use flowdoc::core::batch::BatchOrchestrator;
use flowdoc::storage::LocalStorage;
use std::sync::Arc;

const OPENAI_SECRET: &str = "sk-abcDEF1234567890abcdefGHIJ";

const RECORD: &str = r#"{
    "summary": "Moves rows between two sheets.",
    "toolsUsed": ["Google Sheets"],
    "credentialsRequired": ["Google OAuth"],
    "complexityScore": 2,
    "usageNotes": "Run once per day."
}"#;

struct FixedGenerator;

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GeneratorError> {
        Ok(RECORD.to_string())
    }
}

fn workflow_json() -> String {
    format!(
        r#"{{
            "name": "Sheet Mover",
            "nodes": [{{
                "id": "1",
                "name": "Sheets",
                "type": "n8n-nodes-base.googleSheets",
                "typeVersion": 2,
                "position": [0, 0],
                "parameters": {{"apiKey": "{OPENAI_SECRET}"}}
            }}],
            "connections": {{}}
        }}"#
    )
}

#[tokio::test]
async fn test_directory_to_directory_run() {
    let source = tempfile::TempDir::new().unwrap();
    let dest = tempfile::TempDir::new().unwrap();
    std::fs::write(source.path().join("ok1.json"), workflow_json()).unwrap();
    std::fs::write(source.path().join("ok2.json"), workflow_json()).unwrap();
    std::fs::write(source.path().join("readme.txt"), "not a workflow").unwrap();

    let orchestrator = BatchOrchestrator::new(
        Arc::new(LocalStorage::new()),
        Arc::new(FixedGenerator),
        10_000,
    );
    let summary = orchestrator
        .run(
            source.path().to_str().unwrap(),
            dest.path().to_str().unwrap(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.log.contains(&"Found 2 JSON files.".to_string()));

    let mut produced: Vec<String> = std::fs::read_dir(dest.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    produced.sort();
    assert_eq!(produced, vec!["ok1.json", "ok1.md", "ok2.json", "ok2.md"]);

    let redacted = std::fs::read_to_string(dest.path().join("ok1.json")).unwrap();
    assert!(!redacted.contains(OPENAI_SECRET));
    assert!(redacted.contains("[REDACTED:OpenAI Key]"));

    let markdown = std::fs::read_to_string(dest.path().join("ok1.md")).unwrap();
    assert!(markdown.starts_with("# Moves rows between two sheets."));
    assert!(markdown.contains("## Notes\nRun once per day."));
}

#[tokio::test]
async fn test_unreadable_source_directory_aborts() {
    let dest = tempfile::TempDir::new().unwrap();
    let orchestrator = BatchOrchestrator::new(
        Arc::new(LocalStorage::new()),
        Arc::new(FixedGenerator),
        10_000,
    );
    let err = orchestrator
        .run("/nonexistent/source", dest.path().to_str().unwrap(), None)
        .await
        .unwrap_err();
    assert_eq!(
        err.category,
        flowdoc::core::types::ErrorCategory::ListError
    );
}
