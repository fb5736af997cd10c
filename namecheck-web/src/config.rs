//! Server configuration loaded from `config.toml`.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [upstream]
//! root = "https://api.instantusername.com/c/"
//! timeout_secs = 15
//!
//! [log]
//! level = "info"
//! format = "json"
//! directory = "/var/log/namecheck"
//! ```
//!
//! Every key is optional. `NAMECHECK_HOST` / `NAMECHECK_PORT` override the
//! bind address after the file is read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::upstream::DEFAULT_UPSTREAM_ROOT;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "NAMECHECK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Actix worker threads; defaults to the number of CPUs.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Root URL; `{platform}/{username}` is appended.
    pub root: String,
    /// Per-request timeout, `0` disables it.
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_UPSTREAM_ROOT.to_string(),
            timeout_secs: 15,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    /// Write daily-rotated files here instead of stdout.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load from `$NAMECHECK_CONFIG` (or `./config.toml`), then apply env overrides.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(
            std::env::var("NAMECHECK_HOST").ok(),
            std::env::var("NAMECHECK_PORT").ok(),
        )?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .with_context(|| format!("invalid NAMECHECK_PORT: {port}"))?;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 3000));
        assert!(config.server.workers >= 1);
        assert_eq!(config.upstream.root, DEFAULT_UPSTREAM_ROOT);
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(config.log.directory.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.upstream, UpstreamConfig::default());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config: AppConfig = toml::from_str("[upstream]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.upstream.timeout(), None);
    }

    #[test]
    fn empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(toml::from_str::<AppConfig>("[log]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn overrides_replace_bind_address() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(Some("0.0.0.0".to_string()), Some("9000".to_string()))
            .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 9000));
    }

    #[test]
    fn invalid_port_override_is_an_error() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(None, Some("http".to_string())).is_err());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream]\nroot = \"http://127.0.0.1:9999/c/\"\ntimeout_secs = 3").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.upstream.root, "http://127.0.0.1:9999/c/");
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn load_from_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn load_from_missing_file_is_an_error() {
        let err = AppConfig::load_from(Path::new("/nonexistent/namecheck.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
