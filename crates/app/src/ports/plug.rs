//! Smart plug port: discovery and relay control on the local network.

use std::future::Future;

use remotectl_domain::error::DeviceError;
use remotectl_domain::plug::PlugInfo;

use crate::settings::PlugSettings;

/// Invocation-scoped access to the plugs reachable on the LAN.
pub trait PlugNetwork: Send + Sync {
    /// Scan for plugs, broadcasting unless `target` names one address.
    ///
    /// The scan is bounded by the configured discovery timeout; plugs that
    /// answer late are not reported.
    fn discover(
        &self,
        target: Option<&str>,
    ) -> impl Future<Output = Result<Vec<PlugInfo>, DeviceError>> + Send;

    /// Read a fresh snapshot from the plug at `address`.
    fn refresh(&self, address: &str) -> impl Future<Output = Result<PlugInfo, DeviceError>> + Send;

    /// Open (`true`) or close (`false`) the relay of the plug at `address`.
    fn set_power(
        &self,
        address: &str,
        on: bool,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// Builds invocation-scoped [`PlugNetwork`] handles.
pub trait PlugConnector: Send + Sync {
    /// Network handle type produced by this connector.
    type Network: PlugNetwork + 'static;

    /// Open a handle configured from `settings`.
    fn open(&self, settings: &PlugSettings) -> Self::Network;
}
