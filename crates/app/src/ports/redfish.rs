//! Redfish port: JSON requests against one management controller.

use std::fmt;
use std::future::Future;

use remotectl_domain::error::DeviceError;
use serde_json::Value;

/// Validated connection details for one controller.
#[derive(Clone, PartialEq, Eq)]
pub struct RedfishCredentials {
    /// Hostname or address, optionally with a scheme (`https://` is assumed).
    pub host: String,
    pub username: String,
    pub password: String,
    /// Accept self-signed or otherwise invalid TLS certificates.
    pub insecure: bool,
}

impl fmt::Debug for RedfishCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedfishCredentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// An authenticated session with one controller.
///
/// Paths are either relative to the service root (`Systems`) or absolute
/// resource paths as found in `@odata.id` (`/redfish/v1/Systems/1`).
pub trait RedfishTransport: Send + Sync {
    /// GET a resource and decode its JSON body (`{}` when empty).
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, DeviceError>> + Send;

    /// POST a JSON body and decode the JSON reply (`{}` when empty).
    fn post(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, DeviceError>> + Send;
}

/// Builds invocation-scoped [`RedfishTransport`] sessions.
pub trait RedfishConnector: Send + Sync {
    /// Session type produced by this connector.
    type Transport: RedfishTransport + 'static;

    /// Open a session. No network traffic is required to succeed.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the client cannot be built
    /// (malformed host, TLS backend failure, …).
    fn connect(&self, credentials: &RedfishCredentials) -> Result<Self::Transport, DeviceError>;
}
