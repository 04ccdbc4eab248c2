//! Application services: device client semantics built on the ports.
//!
//! Each service struct accepts a port implementation via a generic parameter
//! (constructor injection), keeping this layer decoupled from concrete
//! protocols.

pub mod plug_service;
pub mod redfish_service;
