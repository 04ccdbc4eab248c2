//! Function settings: the one configuration struct handed to the runner.

use std::fmt;
use std::time::Duration;

use remotectl_domain::error::ConfigurationError;
use serde::Deserialize;

use crate::ports::RedfishCredentials;

/// Everything an invocation needs besides the request itself.
#[derive(Debug, Clone)]
pub struct FunctionSettings {
    pub redfish: RedfishSettings,
    pub plug: PlugSettings,
    /// Watchdog bound on one whole invocation.
    pub deadline: Duration,
}

impl Default for FunctionSettings {
    fn default() -> Self {
        Self {
            redfish: RedfishSettings::default(),
            plug: PlugSettings::default(),
            deadline: Duration::from_secs(30),
        }
    }
}

/// Management controller connection settings, possibly incomplete.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RedfishSettings {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Skip TLS certificate verification (controllers ship self-signed certs).
    pub insecure: bool,
}

impl Default for RedfishSettings {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            insecure: true,
        }
    }
}

impl fmt::Debug for RedfishSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedfishSettings")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl RedfishSettings {
    /// Check that host, username and password are all present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] naming every missing value.
    pub fn credentials(&self) -> Result<RedfishCredentials, ConfigurationError> {
        fn present(value: Option<&String>) -> Option<&str> {
            value.map(String::as_str).filter(|v| !v.is_empty())
        }

        let host = present(self.host.as_ref());
        let username = present(self.username.as_ref());
        let password = present(self.password.as_ref());

        match (host, username, password) {
            (Some(host), Some(username), Some(password)) => Ok(RedfishCredentials {
                host: host.to_string(),
                username: username.to_string(),
                password: password.to_string(),
                insecure: self.insecure,
            }),
            _ => {
                let missing = [("host", host), ("username", username), ("password", password)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(ConfigurationError { missing })
            }
        }
    }
}

/// Smart plug discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlugSettings {
    /// How long a discovery scan listens for replies, in milliseconds.
    pub discovery_timeout_ms: u64,
    /// Address discovery datagrams are broadcast to.
    pub broadcast_address: String,
    /// UDP and TCP port the plugs listen on.
    pub port: u16,
}

impl Default for PlugSettings {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: 5_000,
            broadcast_address: "255.255.255.255".to_string(),
            port: 9999,
        }
    }
}

impl PlugSettings {
    /// Discovery timeout as a [`Duration`].
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }
}
