use crate::constants::*;
use crate::error::{PrecinctError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registration: RegistrationConfig,
    pub elections: ElectionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_header_scan_rows: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_REGISTRATION_INPUT),
            output: PathBuf::from(DEFAULT_REGISTRATION_OUTPUT),
            max_header_scan_rows: DEFAULT_MAX_HEADER_SCAN_ROWS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElectionsConfig {
    pub base_url: String,
    pub start_election_id: u64,
    pub output_dir: PathBuf,
    pub needed: usize,
    /// Only elections whose label contains this text are downloaded.
    /// `None` keeps every election in the list.
    pub label_filter: Option<String>,
    pub delay_ms: u64,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for ElectionsConfig {
    fn default() -> Self {
        Self {
            base_url: ELECTIONS_BASE_URL.to_string(),
            start_election_id: DEFAULT_START_ELECTION_ID,
            output_dir: PathBuf::from(DEFAULT_ELECTIONS_OUTPUT_DIR),
            needed: DEFAULT_NEEDED_ELECTIONS,
            label_filter: Some(DEFAULT_LABEL_FILTER.to_string()),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ElectionsConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn download_url(&self, election_id: u64) -> String {
        self.endpoint(DOWNLOAD_PATH_TEMPLATE, election_id)
    }

    pub fn jump_list_url(&self, election_id: u64) -> String {
        self.endpoint(JUMP_LIST_PATH_TEMPLATE, election_id)
    }

    fn endpoint(&self, template: &str, election_id: u64) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            template.replace("{eid}", &election_id.to_string())
        )
    }
}

impl Config {
    /// Reads a TOML config file. Missing sections and fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PrecinctError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config source: an explicit path must exist, the default
    /// `config.toml` is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.elections.max_attempts == 0 {
            return Err(PrecinctError::Config(
                "elections.max_attempts must be at least 1".into(),
            ));
        }
        if self.elections.base_url.trim().is_empty() {
            return Err(PrecinctError::Config("elections.base_url is empty".into()));
        }
        Ok(())
    }
}
