//! Redfish vocabulary: resource paths, reset types, and handler payloads.

use serde::{Deserialize, Serialize};

use crate::action::define_actions;
use crate::error::ValidationError;

/// Collection of computer systems, relative to the service root.
pub const SYSTEMS: &str = "Systems";
/// Collection of chassis, relative to the service root.
pub const CHASSIS: &str = "Chassis";
/// Thermal sub-resource of a chassis.
pub const THERMAL: &str = "/Thermal";
/// Power sub-resource of a chassis.
pub const POWER: &str = "/Power";
/// Reset action of a computer system.
pub const RESET_ACTION: &str = "/Actions/ComputerSystem.Reset";

/// Value reported when a system record carries no `PowerState`.
pub const UNKNOWN_POWER_STATE: &str = "Unknown";

define_actions!(
    /// Reset types accepted by `ComputerSystem.Reset`.
    PowerAction, unknown = ValidationError::InvalidPowerAction {
        /// Power the system on.
        On => "On",
        /// Cut power immediately.
        ForceOff => "ForceOff",
        /// Ask the operating system to shut down.
        GracefulShutdown => "GracefulShutdown",
        /// Restart without a graceful shutdown.
        ForceRestart => "ForceRestart",
        /// Simulate a press of the physical power button.
        PushPowerButton => "PushPowerButton",
    }
);

/// Body of a `ComputerSystem.Reset` POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(rename = "ResetType")]
    pub reset_type: String,
}

impl From<PowerAction> for ResetRequest {
    fn from(action: PowerAction) -> Self {
        Self {
            reset_type: action.as_str().to_string(),
        }
    }
}

/// Payload of the `power_state` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStateReport {
    #[serde(rename = "PowerState")]
    pub power_state: String,
}

impl PowerStateReport {
    /// Extract the power state from a system record, defaulting to
    /// [`UNKNOWN_POWER_STATE`] when absent or not a string.
    #[must_use]
    pub fn from_system(system: &serde_json::Value) -> Self {
        let power_state = system
            .get("PowerState")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(UNKNOWN_POWER_STATE)
            .to_string();
        Self { power_state }
    }
}

/// Payload of a successful `power_control` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerActionAccepted {
    pub success: String,
}

impl From<PowerAction> for PowerActionAccepted {
    fn from(action: PowerAction) -> Self {
        Self {
            success: format!("Power action '{action}' initiated successfully"),
        }
    }
}
