//! Redfish adapter error types.

use remotectl_domain::error::DeviceError;

/// Errors specific to the Redfish adapter.
#[derive(Debug, thiserror::Error)]
pub enum RedfishError {
    /// The configured host does not form a valid service root URL.
    #[error("invalid controller host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// A resource path cannot be resolved against the service root.
    #[error("invalid resource path {0:?}")]
    InvalidPath(String),

    /// Building the client, sending the request or a non-2xx status.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The controller answered with a body that is not JSON.
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RedfishError {
    /// Collapse into a [`DeviceError`] for propagation across port boundaries.
    pub fn into_domain(self) -> DeviceError {
        DeviceError::request_failed(self)
    }
}

impl From<RedfishError> for DeviceError {
    fn from(err: RedfishError) -> Self {
        err.into_domain()
    }
}
