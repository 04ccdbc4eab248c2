//! Plug service: discovery and relay operations on smart plugs.

use std::net::IpAddr;

use remotectl_domain::error::DeviceError;
use remotectl_domain::plug::{DeviceList, DeviceReport, DiscoveryReport, PlugInfo, SwitchReport};

use crate::ports::PlugNetwork;

/// Device client for the plugs reachable through one [`PlugNetwork`].
pub struct PlugService<N> {
    network: N,
}

impl<N: PlugNetwork> PlugService<N> {
    /// Create a new service on top of a network handle.
    pub fn new(network: N) -> Self {
        Self { network }
    }

    /// Scan the LAN, or a single address when `target` is given.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the scan cannot be performed.
    #[tracing::instrument(skip(self))]
    pub async fn discover(&self, target: Option<&str>) -> Result<DiscoveryReport, DeviceError> {
        let plugs = self.network.discover(target).await?;
        tracing::debug!(count = plugs.len(), "discovery finished");
        Ok(plugs.into_iter().collect())
    }

    /// Every plug answering a broadcast scan, with its full snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the scan cannot be performed.
    #[tracing::instrument(skip(self))]
    pub async fn get_device_list(&self) -> Result<DeviceList, DeviceError> {
        let devices = self.network.discover(None).await?;
        Ok(DeviceList { devices })
    }

    /// Locate the plug at `address` and read a fresh snapshot from it.
    ///
    /// # Errors
    ///
    /// Returns "Device not found at …" when nothing answers at `address`,
    /// or any failure of the scan or the refresh.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, address: &str) -> Result<DeviceReport, DeviceError> {
        self.locate(address).await.map(DeviceReport::from)
    }

    /// Invert the relay state of the plug at `address`.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`get_device`](Self::get_device) and of the
    /// relay command.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_device(&self, address: &str) -> Result<SwitchReport, DeviceError> {
        let plug = self.locate(address).await?;
        let previous = plug.is_on;
        self.switch(plug, !previous).await
    }

    /// Set the relay of the plug at `address` to `on`.
    ///
    /// The command is sent even when the plug already is in that state.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`get_device`](Self::get_device) and of the
    /// relay command.
    #[tracing::instrument(skip(self))]
    pub async fn set_device_state(
        &self,
        address: &str,
        on: bool,
    ) -> Result<SwitchReport, DeviceError> {
        let plug = self.locate(address).await?;
        self.switch(plug, on).await
    }

    async fn locate(&self, address: &str) -> Result<PlugInfo, DeviceError> {
        let found = self.network.discover(Some(address)).await?;
        let Some(plug) = found.into_iter().find(|plug| same_host(&plug.address, address)) else {
            return Err(DeviceError::not_found(address));
        };
        self.network.refresh(&plug.address).await
    }

    async fn switch(&self, plug: PlugInfo, on: bool) -> Result<SwitchReport, DeviceError> {
        self.network.set_power(&plug.address, on).await?;
        tracing::info!(address = %plug.address, previous = plug.is_on, on, "relay switched");
        Ok(SwitchReport::new(plug.address, plug.is_on, on))
    }
}

/// Compare two addresses as IPs when both parse, textually otherwise.
fn same_host(reported: &str, requested: &str) -> bool {
    match (
        reported.parse::<IpAddr>(),
        requested.trim().parse::<IpAddr>(),
    ) {
        (Ok(reported), Ok(requested)) => reported == requested,
        _ => reported == requested,
    }
}
