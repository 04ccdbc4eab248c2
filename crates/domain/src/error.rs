//! Error taxonomy shared across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ShimError`]
//! via `#[from]`. Adapters collapse their protocol errors into a
//! [`DeviceError`], which carries only a human-readable message.

use crate::redfish::PowerAction;

/// Top-level error of one invocation.
///
/// The display text of every variant is exactly what ends up in the
/// `error` field of the response envelope.
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    /// Required configuration is absent.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The request is well-formed JSON but cannot be served as asked.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The device API failed (transport, HTTP status, empty collection, …).
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// The invocation hit the watchdog deadline or was aborted.
    #[error("Operation timed out or was cancelled")]
    Cancelled,

    /// Anything else, including panics caught at the outermost boundary.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// One or more required configuration values are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required configuration: {}", .missing.join(", "))]
pub struct ConfigurationError {
    /// Names of the missing values, in declaration order.
    pub missing: Vec<&'static str>,
}

/// Request validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The action is not part of the family's action set.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// `power_control` was requested without a `power_action`.
    #[error("Missing power_action parameter")]
    MissingPowerAction,

    /// The power action is not one of [`PowerAction::ALL`].
    #[error(
        "Invalid power action: {0}. Valid actions are: {valid}",
        valid = PowerAction::names().join(", ")
    )]
    InvalidPowerAction(String),

    /// A plug action was requested without an `ip_address`.
    #[error("IP address is required")]
    MissingIpAddress,

    /// The `ip_address` is not an IPv4 or IPv6 address.
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// `set_device_state` was requested without a `power_state`.
    #[error("Power state is required")]
    MissingPowerState,
}

/// A device client failure.
///
/// The original error type is deliberately discarded so that callers see a
/// uniform message-only error whatever the protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DeviceError {
    message: String,
}

impl DeviceError {
    /// Wrap an arbitrary message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A failed HTTP exchange with the management controller.
    pub fn request_failed(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("API request failed: {detail}"))
    }

    /// A Redfish collection with no `Members`.
    pub fn no_members(collection: &str) -> Self {
        Self::new(format!("No members found in /{collection}"))
    }

    /// A plug that did not answer discovery at `address`.
    pub fn not_found(address: &str) -> Self {
        Self::new(format!("Device not found at {address}"))
    }

    /// A failed discovery scan.
    pub fn discovery(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Error discovering devices: {detail}"))
    }

    /// The message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
