use crate::Result;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;
use url::Url;

const CONFIG_FILE: &str = "flowdoc.toml";
const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_DRIVE_ENDPOINT: &str = "https://www.googleapis.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_OP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_CONTEXT_BYTES: usize = 10_000;
const DEFAULT_LEVEL: &str = "info";

/// Which storage backend a run talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Drive,
    Local,
}

/// Resolved application configuration after reading the config file and
/// applying env overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ai: AiSettings,
    pub storage: StorageSettings,
    pub batch: BatchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub max_context_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub access_token: Option<String>,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Deadline in seconds applied to each fetch, document, and write.
    pub op_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub default_level: String,
    pub enable_file: bool,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiSettings {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
                endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                max_context_bytes: DEFAULT_MAX_CONTEXT_BYTES,
            },
            storage: StorageSettings {
                backend: StorageBackend::Drive,
                access_token: None,
                endpoint: DEFAULT_DRIVE_ENDPOINT.to_string(),
            },
            batch: BatchSettings {
                op_timeout_secs: DEFAULT_OP_TIMEOUT_SECS,
            },
            logging: LoggingSettings {
                default_level: DEFAULT_LEVEL.to_string(),
                enable_file: false,
                log_dir: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration with deterministic precedence: defaults, config
    /// file, env overrides, then validation. Without an explicit path the
    /// loader looks for `flowdoc.toml` in the current directory and treats
    /// its absence as defaults-only.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = AppConfig::default();
        match config_path {
            Some(path) => {
                let parsed = Self::load_from_file(path)?
                    .ok_or_else(|| anyhow!("config file {} not found", path.display()))?;
                config.apply(parsed);
            }
            None => {
                if let Some(parsed) = Self::load_from_file(Path::new(CONFIG_FILE))? {
                    config.apply(parsed);
                }
            }
        }
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Option<TomlConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let parsed: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(Some(parsed))
    }

    fn apply(&mut self, raw: TomlConfig) {
        if let Some(ai) = raw.ai {
            if let Some(api_key) = ai.api_key {
                self.ai.api_key = Some(api_key);
            }
            if let Some(model) = ai.model {
                self.ai.model = model;
            }
            if let Some(endpoint) = ai.endpoint {
                self.ai.endpoint = endpoint;
            }
            if let Some(timeout) = ai.request_timeout_secs {
                self.ai.request_timeout_secs = timeout;
            }
            if let Some(bytes) = ai.max_context_bytes {
                self.ai.max_context_bytes = bytes;
            }
        }
        if let Some(storage) = raw.storage {
            if let Some(backend) = storage.backend {
                self.storage.backend = backend;
            }
            if let Some(token) = storage.access_token {
                self.storage.access_token = Some(token);
            }
            if let Some(endpoint) = storage.endpoint {
                self.storage.endpoint = endpoint;
            }
        }
        if let Some(batch) = raw.batch {
            if let Some(timeout) = batch.op_timeout_secs {
                self.batch.op_timeout_secs = timeout;
            }
        }
        if let Some(logging) = raw.logging {
            if let Some(level) = logging.default_level {
                self.logging.default_level = level;
            }
            if let Some(enable_file) = logging.enable_file {
                self.logging.enable_file = enable_file;
            }
            if let Some(dir) = logging.log_dir {
                self.logging.log_dir = Some(PathBuf::from(dir));
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                self.ai.api_key = Some(key);
            }
        }
        if let Ok(token) = env::var("DRIVE_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                self.storage.access_token = Some(token);
            }
        }
        if let Ok(level) = env::var("FLOWDOC_LOG") {
            if !level.trim().is_empty() {
                self.logging.default_level = level;
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.ai.model.trim().is_empty() {
            return Err(anyhow!("ai.model must not be empty"));
        }
        Url::parse(&self.ai.endpoint)
            .map_err(|err| anyhow!("invalid ai.endpoint: {}", err))?;
        Url::parse(&self.storage.endpoint)
            .map_err(|err| anyhow!("invalid storage.endpoint: {}", err))?;
        if self.ai.request_timeout_secs == 0 {
            return Err(anyhow!("ai.request_timeout_secs must be greater than zero"));
        }
        if self.batch.op_timeout_secs == 0 {
            return Err(anyhow!("batch.op_timeout_secs must be greater than zero"));
        }
        if self.ai.max_context_bytes == 0 {
            return Err(anyhow!("ai.max_context_bytes must be greater than zero"));
        }
        Directive::from_str(&self.logging.default_level)
            .map_err(|_| anyhow!("logging.default_level must be a valid tracing directive"))?;
        Ok(())
    }

    /// Parsed AI endpoint; validation guarantees this cannot fail after load.
    pub fn ai_endpoint(&self) -> Result<Url> {
        Url::parse(&self.ai.endpoint).map_err(|err| anyhow!("invalid ai.endpoint: {}", err))
    }

    /// Parsed storage endpoint.
    pub fn storage_endpoint(&self) -> Result<Url> {
        Url::parse(&self.storage.endpoint)
            .map_err(|err| anyhow!("invalid storage.endpoint: {}", err))
    }
}

#[derive(Debug, Deserialize)]
struct TomlConfig {
    pub ai: Option<TomlAi>,
    pub storage: Option<TomlStorage>,
    pub batch: Option<TomlBatch>,
    pub logging: Option<TomlLogging>,
}

#[derive(Debug, Deserialize)]
struct TomlAi {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_context_bytes: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TomlStorage {
    pub backend: Option<StorageBackend>,
    pub access_token: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlBatch {
    pub op_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlLogging {
    pub default_level: Option<String>,
    pub enable_file: Option<bool>,
    pub log_dir: Option<String>,
}
