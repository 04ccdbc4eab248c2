//! # remotectl-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that device adapters must implement:
//!   - `RedfishConnector` / `RedfishTransport`: JSON over HTTP to a controller
//!   - `PlugConnector` / `PlugNetwork`: discovery and relay commands on the LAN
//! - Implement the **device client** semantics on top of those ports
//!   (`RedfishService`, `PlugService`)
//! - Map action names to handlers (`RedfishDispatcher`, `PlugDispatcher`)
//! - Parse inbound envelopes and encode outcomes into legacy JSON envelopes
//! - Run one invocation end to end behind a catch-all boundary (`FunctionRunner`)
//!
//! ## Dependency rule
//! Depends on `remotectl-domain` only (plus `tokio` for tasks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dispatcher;
pub mod function;
pub mod ports;
pub mod request;
pub mod response;
pub mod services;
pub mod settings;

#[cfg(test)]
mod testing;
