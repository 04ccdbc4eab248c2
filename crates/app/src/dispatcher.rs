//! Action registry: maps a parsed request onto a device client call.
//!
//! The registry of each family is an exhaustive `match` over its action
//! enum, so adding an action without a handler does not compile.

mod plug;
mod redfish;

pub use plug::PlugDispatcher;
pub use redfish::RedfishDispatcher;

use remotectl_domain::error::ShimError;
use serde::Serialize;
use serde_json::Value;

/// Serialize a handler payload into the JSON that is sent back.
fn to_payload<T: Serialize>(payload: T) -> Result<Value, ShimError> {
    serde_json::to_value(payload).map_err(|err| ShimError::Unexpected(err.to_string()))
}
