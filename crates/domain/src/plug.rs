//! Smart plug snapshots and the payloads of plug handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Serializable snapshot of one plug, as read from its system info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlugInfo {
    /// Network address the plug answered from.
    pub address: String,
    /// User-assigned name.
    pub alias: String,
    /// Hardware model, e.g. `HS100(EU)`.
    pub model: String,
    /// MAC address as reported by the plug.
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<String>,
    /// Whether the relay is closed.
    pub is_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i64>,
    /// Seconds since the relay was last switched on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time: Option<u64>,
}

/// Payload of the `discover` action: address → model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub devices: BTreeMap<String, String>,
}

impl FromIterator<PlugInfo> for DiscoveryReport {
    fn from_iter<I: IntoIterator<Item = PlugInfo>>(iter: I) -> Self {
        Self {
            devices: iter
                .into_iter()
                .map(|plug| (plug.address, plug.model))
                .collect(),
        }
    }
}

/// Payload of the `get_device_list` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceList {
    pub devices: Vec<PlugInfo>,
}

/// Payload of the `get_device` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReport {
    pub success: bool,
    pub device: PlugInfo,
}

impl From<PlugInfo> for DeviceReport {
    fn from(device: PlugInfo) -> Self {
        Self {
            success: true,
            device,
        }
    }
}

/// Payload of the `toggle_device` and `set_device_state` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchReport {
    pub success: bool,
    /// Address of the switched plug.
    pub device: String,
    pub previous_state: bool,
    pub new_state: bool,
}

impl SwitchReport {
    /// Report a relay change on `device`.
    pub fn new(device: impl Into<String>, previous_state: bool, new_state: bool) -> Self {
        Self {
            success: true,
            device: device.into(),
            previous_state,
            new_state,
        }
    }
}
