//! # remotectl-adapter-kasa
//!
//! Kasa adapter: TP-Link smart plugs on the local network.
//!
//! ## Responsibilities
//! - Discover plugs with an encrypted UDP `get_sysinfo` probe
//! - Read snapshots and switch relays over the length-prefixed TCP channel
//! - Map every protocol failure into a [`DeviceError`]
//!
//! ## Dependency rule
//! Depends on `remotectl-app` (port traits) and `remotectl-domain`.

pub mod cipher;
pub mod discovery;
mod error;
pub mod protocol;
pub mod transport;

#[cfg(test)]
mod fake;

pub use error::KasaError;

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use remotectl_app::ports::{PlugConnector, PlugNetwork};
use remotectl_app::settings::PlugSettings;
use remotectl_domain::error::DeviceError;
use remotectl_domain::plug::PlugInfo;

/// Upper bound on one TCP command exchange.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a [`KasaNetwork`] per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct KasaConnector;

impl PlugConnector for KasaConnector {
    type Network = KasaNetwork;

    fn open(&self, settings: &PlugSettings) -> KasaNetwork {
        KasaNetwork::new(settings.clone())
    }
}

/// Plugs reachable with the configured broadcast address and port.
#[derive(Debug, Clone)]
pub struct KasaNetwork {
    settings: PlugSettings,
    command_timeout: Duration,
}

impl KasaNetwork {
    #[must_use]
    pub fn new(settings: PlugSettings) -> Self {
        Self {
            settings,
            command_timeout: COMMAND_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    fn socket_addr(&self, address: &str) -> Result<SocketAddr, KasaError> {
        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| KasaError::InvalidAddress(address.to_string()))?;
        Ok(SocketAddr::new(ip, self.settings.port))
    }

    async fn command(&self, address: &str, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        let target = self.socket_addr(address)?;
        transport::query(target, request, self.command_timeout).await
    }
}

impl PlugNetwork for KasaNetwork {
    async fn discover(&self, target: Option<&str>) -> Result<Vec<PlugInfo>, DeviceError> {
        let destination = self
            .socket_addr(target.unwrap_or(self.settings.broadcast_address.as_str()))
            .map_err(DeviceError::discovery)?;
        discovery::scan(destination, self.settings.discovery_timeout())
            .await
            .map_err(DeviceError::discovery)
    }

    async fn refresh(&self, address: &str) -> Result<PlugInfo, DeviceError> {
        let reply = self.command(address, &protocol::get_sysinfo()).await?;
        Ok(protocol::parse_sysinfo(address, &reply)?)
    }

    async fn set_power(&self, address: &str, on: bool) -> Result<(), DeviceError> {
        let reply = self
            .command(address, &protocol::set_relay_state(on))
            .await?;
        protocol::check_relay_reply(&reply)?;
        tracing::debug!(%address, on, "relay command acknowledged");
        Ok(())
    }
}
