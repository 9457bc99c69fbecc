use actix_web::http::header::HeaderName;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::RelayError;

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub agent: AgentConfig,
    #[serde(default)]
    pub lab_report: LabReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`
    pub path: String,
}

#[derive(Deserialize, Clone)]
pub struct AgentConfig {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub secret: String,
    pub secret_header: String,
    pub timeout_secs: u64,
}

impl AgentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("webhook_url", &self.webhook_url)
            .field("secret", &mask_secret(&self.secret))
            .field("secret_header", &self.secret_header)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LabReportConfig {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 4 {
        "*".repeat(len)
    } else {
        let prefix: String = secret.chars().take(2).collect();
        format!("{}{}", prefix, "*".repeat(len.min(32) - 2))
    }
}

impl RelayConfig {
    /// Load and validate the configuration.
    ///
    /// Sources in increasing precedence: built-in defaults, `relay.toml` in the
    /// working directory, `~/.config/portfolio/relay.toml` (or `path` when given,
    /// which must exist), then `RELAY__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, RelayError> {
        let config = Self::build(path).map_err(|e| {
            RelayError::ServerConfiguration(format!("Failed to load configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn build(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.path", get_default_db_path())?
            .set_default("agent.secret_header", "x-webhook-secret")?
            .set_default("agent.timeout_secs", 300)?
            .set_default("logging.level", "info")?;

        let settings = match path {
            Some(path) => settings.add_source(File::from(path.to_path_buf()).required(true)),
            None => {
                let settings = match std::env::current_dir() {
                    Ok(current_dir) => settings
                        .add_source(File::from(current_dir.join("relay.toml")).required(false)),
                    Err(_) => settings,
                };
                match dirs::config_dir() {
                    Some(config_dir) => settings.add_source(
                        File::from(config_dir.join("portfolio/relay.toml")).required(false),
                    ),
                    None => settings,
                }
            }
        };

        settings
            .add_source(Environment::with_prefix("RELAY").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Reject configurations that would let a request reach the webhook
    /// without an endpoint or credentials.
    pub fn validate(&self) -> Result<(), RelayError> {
        let missing = |key: &str| RelayError::ServerConfiguration(format!("{key} is not set"));

        if self.agent.webhook_url.trim().is_empty() {
            return Err(missing("agent.webhook_url"));
        }
        if self.agent.secret.trim().is_empty() {
            return Err(missing("agent.secret"));
        }
        if self.database.path.trim().is_empty() {
            return Err(missing("database.path"));
        }
        if HeaderName::from_bytes(self.agent.secret_header.as_bytes()).is_err() {
            return Err(RelayError::ServerConfiguration(format!(
                "agent.secret_header '{}' is not a valid header name",
                self.agent.secret_header
            )));
        }
        if self.agent.timeout_secs == 0 {
            return Err(RelayError::ServerConfiguration(
                "agent.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(url) = &self.lab_report.webhook_url {
            if url.trim().is_empty() {
                return Err(missing("lab_report.webhook_url"));
            }
        }
        Ok(())
    }
}

fn get_default_db_path() -> String {
    let path = match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join("portfolio/relay.db"),
        None => PathBuf::from("relay.db"),
    };
    path.to_string_lossy().into_owned()
}
