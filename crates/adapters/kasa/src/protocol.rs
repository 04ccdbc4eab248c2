//! Kasa JSON commands and replies.

use remotectl_domain::plug::PlugInfo;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::KasaError;

/// Query for the full system info of a plug.
#[must_use]
pub fn get_sysinfo() -> Vec<u8> {
    json!({"system": {"get_sysinfo": {}}}).to_string().into_bytes()
}

/// Command closing (`true`) or opening (`false`) the relay.
#[must_use]
pub fn set_relay_state(on: bool) -> Vec<u8> {
    json!({"system": {"set_relay_state": {"state": u8::from(on)}}})
        .to_string()
        .into_bytes()
}

/// The `get_sysinfo` section as reported by plugs.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SysInfo {
    alias: String,
    model: String,
    mac: Option<String>,
    mic_mac: Option<String>,
    #[serde(rename = "deviceId")]
    device_id: Option<String>,
    sw_ver: Option<String>,
    hw_ver: Option<String>,
    relay_state: Option<u8>,
    rssi: Option<i64>,
    on_time: Option<u64>,
}

impl SysInfo {
    fn into_plug(self, address: &str) -> PlugInfo {
        PlugInfo {
            address: address.to_string(),
            alias: self.alias,
            model: self.model,
            mac: self.mac.or(self.mic_mac).unwrap_or_default(),
            device_id: self.device_id,
            software_version: self.sw_ver,
            hardware_version: self.hw_ver,
            is_on: self.relay_state == Some(1),
            rssi: self.rssi,
            on_time: self.on_time,
        }
    }
}

/// Parse a decrypted `get_sysinfo` reply from the plug at `address`.
///
/// # Errors
///
/// Fails when the reply is not JSON, lacks the section or carries a
/// non-zero `err_code`.
pub fn parse_sysinfo(address: &str, reply: &[u8]) -> Result<PlugInfo, KasaError> {
    let section = section(reply, "get_sysinfo")?;
    let info: SysInfo = serde_json::from_value(section)?;
    Ok(info.into_plug(address))
}

/// Check a decrypted `set_relay_state` reply.
///
/// # Errors
///
/// Fails when the reply is malformed or the plug reports an error.
pub fn check_relay_reply(reply: &[u8]) -> Result<(), KasaError> {
    section(reply, "set_relay_state").map(|_| ())
}

/// Extract `system.<name>` from a reply, rejecting non-zero error codes.
fn section(reply: &[u8], name: &'static str) -> Result<Value, KasaError> {
    let mut value: Value = serde_json::from_slice(reply)?;
    let section = value
        .get_mut("system")
        .and_then(|system| system.get_mut(name))
        .map(Value::take)
        .ok_or(KasaError::MissingSection(name))?;

    match section.get("err_code").and_then(Value::as_i64) {
        Some(code) if code != 0 => Err(KasaError::Rejected {
            code,
            message: section
                .get("err_msg")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        _ => Ok(section),
    }
}
