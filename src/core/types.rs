use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ParseError,
    ScanError,
    AiServiceError,
    WriteError,
    FetchError,
    ListError,
    ConfigError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Pipeline stage enumeration for a single file moving through the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FileStage {
    #[default]
    Pending,
    Fetching,
    Parsing,
    Sanitizing,
    Documenting,
    Writing,
    Done,
    Failed,
}

impl std::fmt::Display for FileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FileStage {
    /// Stage the file enters next when the current stage completes cleanly.
    pub fn next(&self) -> FileStage {
        match self {
            FileStage::Pending => FileStage::Fetching,
            FileStage::Fetching => FileStage::Parsing,
            FileStage::Parsing => FileStage::Sanitizing,
            FileStage::Sanitizing => FileStage::Documenting,
            FileStage::Documenting => FileStage::Writing,
            FileStage::Writing => FileStage::Done,
            FileStage::Done | FileStage::Failed => *self,
        }
    }

    /// Error category recorded when this stage fails.
    pub fn failure_category(&self) -> ErrorCategory {
        match self {
            FileStage::Fetching => ErrorCategory::FetchError,
            FileStage::Parsing => ErrorCategory::ParseError,
            FileStage::Sanitizing => ErrorCategory::ScanError,
            FileStage::Documenting => ErrorCategory::AiServiceError,
            FileStage::Writing => ErrorCategory::WriteError,
            FileStage::Pending | FileStage::Done | FileStage::Failed => ErrorCategory::Unknown,
        }
    }
}
