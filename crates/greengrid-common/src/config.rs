//! ---
//! gg_section: "01-shared-runtime"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Shared configuration and logging primitives."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

fn default_backend_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    3
}

fn default_history_interval_secs() -> u64 {
    10
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

/// Primary configuration object for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "GREENGRID_CONFIG";
    pub const ENV_BACKEND_URL: &'static str = "GREENGRID_BACKEND";

    /// Load configuration from disk, respecting the `GREENGRID_CONFIG` path
    /// override and the `GREENGRID_BACKEND` base-address override. When no
    /// candidate file exists the built-in defaults are used; the dashboard
    /// must come up without any file present.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        let mut loaded = Self::locate(candidates)?;
        if let Ok(base) = std::env::var(Self::ENV_BACKEND_URL) {
            if !base.trim().is_empty() {
                loaded.config.backend.base_url = base.trim().to_owned();
            }
        }
        loaded.config.validate()?;
        Ok(loaded)
    }

    fn locate<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()?;
        self.refresh.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Location and timeout for the backend prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("invalid backend base url '{}'", self.base_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        self.base()?;
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("backend request_timeout_secs must be non-zero"));
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Cadence for the periodic history re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_history_interval_secs")]
    pub history_interval_secs: u64,
}

impl RefreshConfig {
    pub fn history_interval(&self) -> Duration {
        Duration::from_secs(self.history_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_interval_secs == 0 {
            return Err(anyhow!("refresh history_interval_secs must be non-zero"));
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            history_interval_secs: default_history_interval_secs(),
        }
    }
}

/// File logging destination. The dashboard never logs to stdout because the
/// terminal is owned by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.refresh.history_interval_secs, 10);
    }

    #[test]
    fn parses_partial_toml() {
        let config: AppConfig = r#"
            [backend]
            base_url = "http://grid.internal:9000"
        "#
        .parse()
        .unwrap();
        assert_eq!(config.backend.base_url, "http://grid.internal:9000");
        // untouched sections keep their defaults
        assert_eq!(config.refresh.history_interval_secs, 10);
    }

    #[test]
    fn rejects_malformed_backend_url() {
        let config: Result<AppConfig> = "[backend]\nbase_url = \"not a url\"".parse();
        assert!(config.is_err());
    }

    #[test]
    fn loads_from_candidate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greengrid.toml");
        std::fs::write(&path, "[refresh]\nhistory_interval_secs = 30\n").unwrap();
        let loaded = AppConfig::load_with_source(&[&path]).unwrap();
        assert_eq!(loaded.config.refresh.history_interval_secs, 30);
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let loaded =
            AppConfig::load_with_source(&[Path::new("does/not/exist.toml")]).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.backend.base_url, "http://localhost:8000");
    }
}
