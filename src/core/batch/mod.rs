#![allow(clippy::result_large_err)]

use crate::ai::TextGenerator;
use crate::core::documenter::{render_markdown, Documenter};
use crate::core::error::AppError;
use crate::core::naming::{derive_names, OutputNames};
use crate::core::sanitize::sanitize;
use crate::core::types::{ErrorCategory, FileStage};
use crate::core::workflow::{parse_workflow, serialize_workflow};
use crate::storage::{RemoteFile, Storage};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::timeout;
use uuid::Uuid;

const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(120);
const SOURCE_MIME: &str = "application/json";

/// Final outcome for one input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub stage: FileStage,
    pub outputs: Option<OutputNames>,
    pub error: Option<String>,
}

/// Result of one end-to-end batch run.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub processed: usize,
    pub failed: usize,
    pub reports: Vec<FileReport>,
    pub log: Vec<String>,
}

/// Append-only progress log, mirrored to an optional channel so callers can
/// display lines while the run is still going.
struct BatchLog {
    lines: Vec<String>,
    tx: Option<UnboundedSender<String>>,
}

impl BatchLog {
    fn new(tx: Option<UnboundedSender<String>>) -> Self {
        BatchLog { lines: Vec::new(), tx }
    }

    fn append(&mut self, line: String) {
        tracing::info!("{}", line);
        if let Some(tx) = &self.tx {
            let _ = tx.send(line.clone());
        }
        self.lines.push(line);
    }
}

/// Drives each listed file through fetch, parse, sanitize, document, name,
/// write. Files are processed strictly sequentially; a failure ends that
/// file's remaining stages and never the batch. Only a failed source listing
/// aborts the run, before any file is touched.
pub struct BatchOrchestrator {
    storage: Arc<dyn Storage>,
    documenter: Documenter,
    op_timeout: Duration,
    cancel: Arc<AtomicBool>,
}

impl BatchOrchestrator {
    pub fn new(
        storage: Arc<dyn Storage>,
        generator: Arc<dyn TextGenerator>,
        max_context_bytes: usize,
    ) -> Self {
        BatchOrchestrator {
            storage,
            documenter: Documenter::new(generator, max_context_bytes),
            op_timeout: DEFAULT_OP_TIMEOUT,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Deadline applied to each suspension point (fetch, document, write).
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Shared flag checked before each file's fetch; setting it stops the
    /// run without rolling back files already written.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn run(
        &self,
        source_folder: &str,
        dest_folder: &str,
        log_tx: Option<UnboundedSender<String>>,
    ) -> Result<BatchSummary, AppError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut log = BatchLog::new(log_tx);

        log.append("Starting batch process...".to_string());

        let files = timeout(
            self.op_timeout,
            self.storage.list_files(source_folder, SOURCE_MIME),
        )
        .await
        .map_err(|_| {
            AppError::new(
                ErrorCategory::ListError,
                format!("source listing timed out after {:?}", self.op_timeout),
            )
        })?
        .map_err(AppError::from)?;

        log.append(format!("Found {} JSON files.", files.len()));

        let mut reports = Vec::with_capacity(files.len());
        let mut processed = 0;
        let mut failed = 0;

        for file in &files {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::info!(run_id = %run_id, "cancellation requested; stopping before {}", file.name);
                break;
            }

            log.append(format!("Processing: {}...", file.name));
            match self.process_file(file, dest_folder).await {
                Ok(outputs) => {
                    log.append(format!("Saved: {} & {}", outputs.json_name, outputs.md_name));
                    processed += 1;
                    reports.push(FileReport {
                        file_name: file.name.clone(),
                        stage: FileStage::Done,
                        outputs: Some(outputs),
                        error: None,
                    });
                }
                Err(error) => {
                    tracing::error!(run_id = %run_id, file = %file.name, "{}", error);
                    log.append(format!("Error on {}: {}", file.name, error.category));
                    failed += 1;
                    reports.push(FileReport {
                        file_name: file.name.clone(),
                        stage: FileStage::Failed,
                        outputs: None,
                        error: Some(error.to_string()),
                    });
                }
            }
        }

        if failed > 0 {
            log.append(format!("Batch processing complete. ({} failed)", failed));
        } else {
            log.append("Batch processing complete.".to_string());
        }

        Ok(BatchSummary {
            run_id,
            started_at,
            completed_at: Utc::now(),
            processed,
            failed,
            reports,
            log: log.lines,
        })
    }

    async fn process_file(
        &self,
        file: &RemoteFile,
        dest_folder: &str,
    ) -> Result<OutputNames, AppError> {
        // Fetching
        let content = timeout(self.op_timeout, self.storage.fetch_content(&file.id))
            .await
            .map_err(|_| self.timeout_error(FileStage::Fetching, &file.name))?
            .map_err(AppError::from)?;

        // Parsing
        let workflow = parse_workflow(&content)?;

        // Sanitizing
        let sanitized = sanitize(&workflow)?;
        for warning in &sanitized.warnings {
            tracing::warn!(file = %file.name, "{}", warning);
        }

        // Documenting: only the redacted workflow is ever shown to the AI.
        let record = timeout(
            self.op_timeout,
            self.documenter.document(&sanitized.workflow),
        )
        .await
        .map_err(|_| self.timeout_error(FileStage::Documenting, &file.name))??;

        // Naming and Writing
        let outputs = derive_names(&record, &file.name);
        let json_content = serialize_workflow(&sanitized.workflow)?;
        let md_content = render_markdown(&record);

        self.write_artifact(&outputs.json_name, &json_content, dest_folder, "application/json")
            .await?;
        self.write_artifact(&outputs.md_name, &md_content, dest_folder, "text/markdown")
            .await?;

        Ok(outputs)
    }

    async fn write_artifact(
        &self,
        name: &str,
        content: &str,
        dest_folder: &str,
        mime_type: &str,
    ) -> Result<(), AppError> {
        timeout(
            self.op_timeout,
            self.storage.upload_file(name, content, dest_folder, mime_type),
        )
        .await
        .map_err(|_| self.timeout_error(FileStage::Writing, name))?
        .map_err(AppError::from)
    }

    fn timeout_error(&self, stage: FileStage, name: &str) -> AppError {
        let mut error = AppError::new(
            stage.failure_category(),
            format!("{} timed out after {:?}", stage, self.op_timeout),
        );
        error.add_context("file", name);
        error
    }
}
