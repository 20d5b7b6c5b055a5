use crate::{
    ai::{GeminiClient, TextGenerator},
    cli::args::{ProcessArgs, ScanArgs},
    core::{
        batch::BatchOrchestrator,
        config::{AppConfig, StorageBackend},
        sanitize::sanitize,
        workflow::{parse_workflow, serialize_workflow},
    },
    logging,
    storage::{DriveClient, LocalStorage, Storage},
    Result,
};
use anyhow::{anyhow, Context};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn process(args: ProcessArgs) -> Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(api_key) = args.api_key {
        config.ai.api_key = Some(api_key);
    }
    if let Some(access_token) = args.access_token {
        config.storage.access_token = Some(access_token);
    }
    if let Some(model) = args.model {
        config.ai.model = model;
    }
    if let Some(op_timeout) = args.op_timeout {
        config.batch.op_timeout_secs = op_timeout;
    }
    if args.local {
        config.storage.backend = StorageBackend::Local;
    }

    let _guard = logging::init(&config.logging)?;

    let api_key = config.ai.api_key.clone().ok_or_else(|| {
        anyhow!("a Gemini API key is required; pass --api-key or set GEMINI_API_KEY")
    })?;
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
        config.ai_endpoint()?,
        api_key,
        config.ai.model.clone(),
        Duration::from_secs(config.ai.request_timeout_secs),
    )?);

    let storage: Arc<dyn Storage> = match config.storage.backend {
        StorageBackend::Local => Arc::new(LocalStorage::new()),
        StorageBackend::Drive => {
            let access_token = config.storage.access_token.clone().ok_or_else(|| {
                anyhow!("a Drive access token is required; pass --access-token or set DRIVE_ACCESS_TOKEN")
            })?;
            Arc::new(DriveClient::new(config.storage_endpoint()?, access_token))
        }
    };

    let cancel = Arc::new(AtomicBool::new(false));
    let interrupt_flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; stopping after the current file");
            interrupt_flag.store(true, Ordering::SeqCst);
        }
    });

    let orchestrator = BatchOrchestrator::new(storage, generator, config.ai.max_context_bytes)
        .with_op_timeout(Duration::from_secs(config.batch.op_timeout_secs))
        .with_cancel_flag(cancel);

    // The sender moves into the run future and drops when the run returns,
    // which ends the printer loop.
    let (log_tx, mut log_rx) = mpsc::unbounded_channel();
    let printer = async move {
        while let Some(line) = log_rx.recv().await {
            println!("{line}");
        }
    };
    let (outcome, _) = futures::future::join(
        orchestrator.run(&args.source, &args.dest, Some(log_tx)),
        printer,
    )
    .await;

    let summary = outcome?;
    tracing::info!(
        run_id = %summary.run_id,
        processed = summary.processed,
        failed = summary.failed,
        "batch run finished"
    );
    Ok(())
}

pub async fn scan(args: ScanArgs) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let _guard = logging::init(&config.logging)?;

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let workflow = parse_workflow(&content)?;
    let result = sanitize(&workflow)?;

    if result.warnings.is_empty() {
        println!("No secrets detected in {}.", args.file.display());
    } else {
        for warning in &result.warnings {
            println!("{warning}");
        }
        println!("{} potential secret(s) redacted.", result.warnings.len());
    }

    if let Some(output) = args.output {
        let rendered = serialize_workflow(&result.workflow)?;
        fs::write(&output, rendered)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Redacted copy written to {}.", output.display());
    }
    Ok(())
}
