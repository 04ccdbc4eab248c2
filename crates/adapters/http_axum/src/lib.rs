//! # remotectl-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve one function endpoint per device family (`/redfish`, `/plug`)
//!   and the configured default family at `/`
//! - Map an HTTP request (method, headers, raw body) into a
//!   [`RequestEnvelope`](remotectl_domain::request::RequestEnvelope)
//! - Always answer `200 OK` with the JSON envelope produced by the runner;
//!   failures live in the body, not in the status code
//!
//! ## Dependency rule
//! Depends on `remotectl-app` (for the function runner and port traits) and
//! `remotectl-domain`. Never leaks axum types into the domain.

pub mod api;
pub mod router;
pub mod state;
