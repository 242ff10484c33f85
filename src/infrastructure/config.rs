use crate::domain::error::AdminError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(
        default = "default_investments_service_url",
        alias = "investmentsServiceUrl"
    )]
    pub investments_service_url: String,
    #[serde(
        default = "default_financial_companies_service_url",
        alias = "financialCompaniesServiceUrl"
    )]
    pub financial_companies_service_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_cache_clear_interval_ms")]
    pub cache_clear_interval_ms: u64,
    #[serde(default = "default_header_read_timeout_secs")]
    pub header_read_timeout_secs: u64,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            investments_service_url: default_investments_service_url(),
            financial_companies_service_url: default_financial_companies_service_url(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_clear_interval_ms: default_cache_clear_interval_ms(),
            header_read_timeout_secs: default_header_read_timeout_secs(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    /// `{investments_service_url}/investments`
    pub fn investments_url(&self) -> String {
        format!("{}/investments", trim_base(&self.investments_service_url))
    }

    /// `{investments_service_url}/investments/{id}`
    pub fn investment_url(&self, id: &str) -> String {
        format!("{}/{}", self.investments_url(), id)
    }

    /// `{investments_service_url}/investments/export`
    pub fn export_url(&self) -> String {
        format!("{}/export", self.investments_url())
    }

    /// Base the resolver appends a company id to: `{financial_companies_service_url}/companies`
    pub fn companies_url(&self) -> String {
        format!(
            "{}/companies",
            trim_base(&self.financial_companies_service_url)
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_clear_interval(&self) -> Duration {
        Duration::from_millis(self.cache_clear_interval_ms)
    }

    /// How long an incoming connection may take to send its request head
    pub fn header_read_timeout(&self) -> Duration {
        Duration::from_secs(self.header_read_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        if self.investments_service_url.trim().is_empty() {
            return Err(AdminError::Config(
                "investments_service_url must not be empty".to_string(),
            ));
        }
        if self.financial_companies_service_url.trim().is_empty() {
            return Err(AdminError::Config(
                "financial_companies_service_url must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AdminError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.header_read_timeout_secs == 0 {
            return Err(AdminError::Config(
                "header_read_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.cache_clear_interval_ms == 0 {
            return Err(AdminError::Config(
                "cache_clear_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn trim_base(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

// Defaults
fn default_investments_service_url() -> String {
    "http://localhost:8081".to_string()
}
fn default_financial_companies_service_url() -> String {
    "http://localhost:8082".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_cache_clear_interval_ms() -> u64 {
    // one hour
    3_600_000
}
fn default_header_read_timeout_secs() -> u64 {
    10
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("holdings-admin").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, AdminError> {
    let config = toml::from_str::<Config>(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, or from the default location when `path` is `None`.
///
/// A missing default file yields defaults. An unreadable explicit path is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, AdminError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdminError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            Some(p.to_path_buf())
        }
        None => get_config_path(),
    };

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file {}: {}. Using defaults.",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample(path: Option<&Path>) -> Result<PathBuf, AdminError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path().ok_or_else(|| {
            AdminError::Config("Cannot determine config directory".to_string())
        })?,
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| AdminError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| AdminError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(path)
}
