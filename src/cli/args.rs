use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Source folder holding workflow exports (Drive folder ID, or a
    /// directory path with --local)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Destination folder for the redacted copies and generated docs
    #[arg(value_name = "DEST")]
    pub dest: String,

    /// Use the local filesystem backend instead of Google Drive
    #[arg(long)]
    pub local: bool,

    /// Path to custom config file (default: ./flowdoc.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Gemini API key (overrides config file and GEMINI_API_KEY)
    #[arg(long, value_name = "KEY", help_heading = "Service Access")]
    pub api_key: Option<String>,

    /// Drive bearer token (overrides config file and DRIVE_ACCESS_TOKEN)
    #[arg(long, value_name = "TOKEN", help_heading = "Service Access")]
    pub access_token: Option<String>,

    /// Generative model to request (default: gemini-pro)
    #[arg(long, value_name = "MODEL", help_heading = "Service Access")]
    pub model: Option<String>,

    /// Per-operation deadline in seconds for fetch, document, and write
    #[arg(long, value_name = "SECONDS", help_heading = "Timeout Overrides")]
    pub op_timeout: Option<u64>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Workflow JSON file to sanitize
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the redacted copy to this path (default: report only)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to custom config file (default: ./flowdoc.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}
