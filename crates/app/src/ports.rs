//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the device
//! protocols. A connector builds a fresh, invocation-scoped handle; the
//! handle is dropped when the invocation ends, so nothing is pooled or
//! cached across invocations.

pub mod plug;
pub mod redfish;

pub use plug::{PlugConnector, PlugNetwork};
pub use redfish::{RedfishConnector, RedfishCredentials, RedfishTransport};
