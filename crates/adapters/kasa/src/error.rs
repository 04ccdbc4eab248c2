//! Kasa adapter error types.

use std::time::Duration;

use remotectl_domain::error::DeviceError;

/// Errors specific to the Kasa adapter.
#[derive(Debug, thiserror::Error)]
pub enum KasaError {
    /// A target or broadcast address is not an IP address.
    #[error("invalid plug address {0:?}")]
    InvalidAddress(String),

    /// Socket failure (bind, connect, send, receive).
    #[error("network error: {0}")]
    Io(#[from] std::io::Error),

    /// The plug did not answer a command in time.
    #[error("no reply from {address} within {timeout:?}")]
    Timeout { address: String, timeout: Duration },

    /// A frame longer than the protocol allows.
    #[error("frame of {0} bytes exceeds the {max} byte limit", max = crate::transport::MAX_FRAME)]
    FrameTooLarge(usize),

    /// The decrypted reply is not JSON.
    #[error("invalid reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// The reply is JSON but lacks the expected section.
    #[error("unexpected reply: missing {0}")]
    MissingSection(&'static str),

    /// The plug rejected the command.
    #[error("plug returned error code {code}{}", detail(.message.as_deref()))]
    Rejected { code: i64, message: Option<String> },
}

fn detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl KasaError {
    /// Collapse into a [`DeviceError`] for propagation across port boundaries.
    pub fn into_domain(self) -> DeviceError {
        DeviceError::new(self.to_string())
    }
}

impl From<KasaError> for DeviceError {
    fn from(err: KasaError) -> Self {
        err.into_domain()
    }
}
