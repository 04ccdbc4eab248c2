use remotectl_domain::action::RedfishAction;
use remotectl_domain::error::ValidationError;
use remotectl_domain::outcome::{Family, Outcome};
use remotectl_domain::request::ParsedRequest;

use super::to_payload;
use crate::ports::RedfishTransport;
use crate::services::redfish_service::RedfishService;

/// Dispatches Redfish actions to a [`RedfishService`].
pub struct RedfishDispatcher<T> {
    service: RedfishService<T>,
}

impl<T: RedfishTransport> RedfishDispatcher<T> {
    pub fn new(service: RedfishService<T>) -> Self {
        Self { service }
    }

    /// Run the action selected by `request`, `system_info` when absent.
    pub async fn dispatch(&self, request: &ParsedRequest) -> Outcome {
        let action: RedfishAction = request
            .action_or(Family::Redfish.default_action())
            .parse()?;
        tracing::debug!(%action, "dispatching");

        match action {
            RedfishAction::SystemInfo => Ok(self.service.get_system_info().await?),
            RedfishAction::Thermal => Ok(self.service.get_thermal_info().await?),
            RedfishAction::Power => Ok(self.service.get_power_info().await?),
            RedfishAction::PowerState => to_payload(self.service.get_power_state().await?),
            RedfishAction::PowerControl => {
                let power_action = request
                    .rendered("power_action")
                    .ok_or(ValidationError::MissingPowerAction)?;
                to_payload(self.service.set_power_state(&power_action).await?)
            }
        }
    }
}
