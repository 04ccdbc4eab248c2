//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `remotectl.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;
use std::time::Duration;

use remotectl_app::settings::{FunctionSettings, PlugSettings, RedfishSettings};
use remotectl_domain::outcome::Family;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Per-invocation settings.
    pub invocation: InvocationConfig,
    /// Management controller connection.
    pub redfish: RedfishSettings,
    /// Smart plug discovery.
    pub plug: PlugSettings,
}

/// How requests reach the daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerMode {
    /// Long-running HTTP server (of-watchdog `http` mode).
    #[default]
    Http,
    /// One request on stdin, one response on stdout, then exit.
    Stdio,
}

impl FromStr for ServerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "stdio" => Ok(Self::Stdio),
            other => Err(format!("unknown server mode {other:?}")),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// HTTP server or single-shot stdio.
    pub mode: ServerMode,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Invocation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InvocationConfig {
    /// Family served at `/` and in stdio mode.
    pub family: Family,
    /// Watchdog deadline of one invocation, in seconds.
    pub deadline_secs: u64,
}

impl Config {
    /// Load configuration from `remotectl.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// environment override cannot be parsed, or if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("remotectl.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("REMOTECTL_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("REMOTECTL_PORT") {
            self.server.port = parse("REMOTECTL_PORT", &val)?;
        }
        if let Some(val) = var("REMOTECTL_BIND") {
            let (host, port) = val.rsplit_once(':').ok_or_else(|| ConfigError::Env {
                key: "REMOTECTL_BIND",
                value: val.clone(),
            })?;
            self.server.host = host.to_string();
            self.server.port = parse("REMOTECTL_BIND", port)?;
        }
        if let Some(val) = var("REMOTECTL_MODE") {
            self.server.mode = parse("REMOTECTL_MODE", &val)?;
        }
        if let Some(val) = var("REMOTECTL_FAMILY") {
            self.invocation.family = parse("REMOTECTL_FAMILY", &val)?;
        }
        if let Some(val) = var("REMOTECTL_DEADLINE_SECS") {
            self.invocation.deadline_secs = parse("REMOTECTL_DEADLINE_SECS", &val)?;
        }
        if let Some(val) = var("REMOTECTL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("ILO_HOST") {
            self.redfish.host = Some(val);
        }
        if let Some(val) = var("ILO_USERNAME") {
            self.redfish.username = Some(val);
        }
        if let Some(val) = var("ILO_PASSWORD") {
            self.redfish.password = Some(val);
        }
        if let Some(val) = var("REMOTECTL_INSECURE") {
            self.redfish.insecure = parse_flag("REMOTECTL_INSECURE", &val)?;
        }
        if let Some(val) = var("KASA_DISCOVERY_TIMEOUT_MS") {
            self.plug.discovery_timeout_ms = parse("KASA_DISCOVERY_TIMEOUT_MS", &val)?;
        }
        if let Some(val) = var("KASA_BROADCAST_ADDRESS") {
            self.plug.broadcast_address = val;
        }
        if let Some(val) = var("KASA_PORT") {
            self.plug.port = parse("KASA_PORT", &val)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.plug.port == 0 {
            return Err(ConfigError::Validation(
                "plug port must be non-zero".to_string(),
            ));
        }
        if self.invocation.deadline_secs == 0 {
            return Err(ConfigError::Validation(
                "deadline must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Everything the function runner needs, detached from the file layout.
    #[must_use]
    pub fn function_settings(&self) -> FunctionSettings {
        FunctionSettings {
            redfish: self.redfish.clone(),
            plug: self.plug.clone(),
            deadline: Duration::from_secs(self.invocation.deadline_secs),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        key,
        value: value.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env {
            key,
            value: value.to_string(),
        }),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mode: ServerMode::Http,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "remotectld=info,remotectl=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            family: Family::Redfish,
            deadline_secs: 30,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// An environment override has an unusable value.
    #[error("invalid value {value:?} for {key}")]
    Env { key: &'static str, value: String },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
