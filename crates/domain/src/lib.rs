//! # remotectl-domain
//!
//! Pure domain model for the remotectl function.
//!
//! ## Responsibilities
//! - Define the closed **action sets** of each device family (Redfish, plug)
//! - Define the **parsed request** and the inbound **request envelope**
//! - Define the **payloads** handlers return (power reports, plug snapshots, …)
//! - Define the **error taxonomy** (configuration, validation, device, unexpected)
//! - Define the unified **outcome** every dispatch path terminates in
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod action;
pub mod error;
pub mod invocation;
pub mod outcome;
pub mod plug;
pub mod redfish;
pub mod request;
