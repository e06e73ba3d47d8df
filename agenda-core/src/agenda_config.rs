//! Global agenda configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::{AgendaError, AgendaResult};

static DEFAULT_API_URL: &str = "http://localhost:8000";
static DEFAULT_REQUEST_TIMEOUT: &str = "30s";

/// Environment variable that relocates the whole agenda home directory.
pub const HOME_ENV: &str = "AGENDA_HOME";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> String {
    DEFAULT_REQUEST_TIMEOUT.to_string()
}

/// Configuration at ~/.config/agenda/config.toml
///
/// Every key can be overridden with an `AGENDA_`-prefixed environment
/// variable, e.g. `AGENDA_API_URL`.
#[derive(Deserialize, Clone, Debug)]
pub struct AgendaConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl AgendaConfig {
    /// Load config from the agenda home, creating a commented default file
    /// on first run.
    pub fn load() -> AgendaResult<Self> {
        Self::load_from(&home_dir()?)
    }

    pub fn load_from(home: &Path) -> AgendaResult<Self> {
        let config_path = home.join("config.toml");

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: AgendaConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("AGENDA"))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn api_url(&self) -> AgendaResult<Url> {
        Url::parse(&self.api_url)
            .map_err(|e| AgendaError::Config(format!("Invalid api_url '{}': {e}", self.api_url)))
    }

    pub fn request_timeout(&self) -> AgendaResult<Duration> {
        humantime::parse_duration(&self.request_timeout).map_err(|e| {
            AgendaError::Config(format!(
                "Invalid request_timeout '{}': {e}",
                self.request_timeout
            ))
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where the agenda REST backend lives:
# api_url = \"{}\"

# How long to wait for a single request:
# request_timeout = \"{}\"
",
            DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Base directory for config and session files.
///
/// `$AGENDA_HOME` wins over the platform config dir.
pub fn home_dir() -> AgendaResult<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    Ok(dirs::config_dir()
        .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
        .join("agenda"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_commented_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgendaConfig::load_from(dir.path()).unwrap();

        assert!(dir.path().join("config.toml").exists());
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(30));
        assert!(config.api_url().is_ok());
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "api_url = \"http://agenda.local:9000\"\nrequest_timeout = \"2m\"\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(dir.path()).unwrap();

        // AGENDA_API_URL may be set by the environment running the tests
        if std::env::var_os("AGENDA_API_URL").is_none() {
            assert_eq!(config.api_url, "http://agenda.local:9000");
        }
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn rejects_bad_timeout() {
        let config = AgendaConfig {
            request_timeout: "soon".into(),
            ..AgendaConfig::default()
        };
        assert!(matches!(
            config.request_timeout(),
            Err(AgendaError::Config(_))
        ));
    }
}
