//! Redfish service: system, thermal and power operations on one controller.

use remotectl_domain::error::{DeviceError, ShimError};
use remotectl_domain::redfish::{
    self, PowerAction, PowerActionAccepted, PowerStateReport, ResetRequest,
};
use serde_json::Value;

use crate::ports::RedfishTransport;

/// Device client for the first system and chassis exposed by a controller.
pub struct RedfishService<T> {
    transport: T,
}

impl<T: RedfishTransport> RedfishService<T> {
    /// Create a new service on top of an open session.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Full record of the first computer system.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the collection is empty or any
    /// request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_system_info(&self) -> Result<Value, DeviceError> {
        let system = self.first_member(redfish::SYSTEMS).await?;
        self.transport.get(&system).await
    }

    /// Thermal resource of the first chassis.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the collection is empty or any
    /// request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_thermal_info(&self) -> Result<Value, DeviceError> {
        let chassis = self.first_member(redfish::CHASSIS).await?;
        self.transport
            .get(&format!("{chassis}{}", redfish::THERMAL))
            .await
    }

    /// Power resource of the first chassis.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the collection is empty or any
    /// request fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_power_info(&self) -> Result<Value, DeviceError> {
        let chassis = self.first_member(redfish::CHASSIS).await?;
        self.transport
            .get(&format!("{chassis}{}", redfish::POWER))
            .await
    }

    /// `PowerState` of the first system, `"Unknown"` when not reported.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`get_system_info`](Self::get_system_info).
    #[tracing::instrument(skip(self))]
    pub async fn get_power_state(&self) -> Result<PowerStateReport, DeviceError> {
        let system = self.get_system_info().await?;
        Ok(PowerStateReport::from_system(&system))
    }

    /// Request a reset of the first system.
    ///
    /// The action is validated before any request is made. Success means
    /// the controller accepted the POST; its body is not inspected.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown reset type, or a device
    /// error when resolving the system or posting the reset fails.
    #[tracing::instrument(skip(self))]
    pub async fn set_power_state(&self, action: &str) -> Result<PowerActionAccepted, ShimError> {
        let action: PowerAction = action.parse()?;
        let system = self.first_member(redfish::SYSTEMS).await?;
        let body = serde_json::to_value(ResetRequest::from(action))
            .map_err(|err| ShimError::Unexpected(err.to_string()))?;
        self.transport
            .post(&format!("{system}{}", redfish::RESET_ACTION), body)
            .await?;
        tracing::info!(%action, "power action accepted");
        Ok(PowerActionAccepted::from(action))
    }

    /// Resolve the `@odata.id` of the first member of a collection.
    async fn first_member(&self, collection: &str) -> Result<String, DeviceError> {
        let listing = self.transport.get(collection).await?;
        let first = listing
            .get("Members")
            .and_then(Value::as_array)
            .and_then(|members| members.first())
            .ok_or_else(|| DeviceError::no_members(collection))?;
        first
            .get("@odata.id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                DeviceError::new(format!("First member of /{collection} has no @odata.id"))
            })
    }
}
