pub mod batch;
pub mod config;
pub mod documenter;
pub mod error;
pub mod naming;
pub mod sanitize;
pub mod types;
pub mod workflow;

pub use batch::{BatchOrchestrator, BatchSummary, FileReport};
pub use config::{AppConfig, StorageBackend};
pub use documenter::{DocumentationRecord, Documenter};
pub use error::AppError;
pub use naming::{derive_names, OutputNames};
pub use sanitize::{sanitize, SanitizationResult, Warning};
pub use types::{ErrorCategory, ErrorSeverity, FileStage};
pub use workflow::{parse_workflow, serialize_workflow, Workflow};
