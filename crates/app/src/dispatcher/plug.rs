use std::net::IpAddr;

use remotectl_domain::action::PlugAction;
use remotectl_domain::error::ValidationError;
use remotectl_domain::outcome::{Family, Outcome};
use remotectl_domain::request::ParsedRequest;

use super::to_payload;
use crate::ports::PlugNetwork;
use crate::services::plug_service::PlugService;

/// Dispatches plug actions to a [`PlugService`].
pub struct PlugDispatcher<N> {
    service: PlugService<N>,
}

impl<N: PlugNetwork> PlugDispatcher<N> {
    pub fn new(service: PlugService<N>) -> Self {
        Self { service }
    }

    /// Run the action selected by `request`.
    ///
    /// There is no default plug action: a request without one is reported
    /// as an unknown empty action.
    pub async fn dispatch(&self, request: &ParsedRequest) -> Outcome {
        let action: PlugAction = request
            .action_or(Family::Plug.default_action())
            .parse()?;
        tracing::debug!(%action, "dispatching");

        match action {
            PlugAction::Discover => {
                to_payload(self.service.discover(request.text("target")).await?)
            }
            PlugAction::GetDeviceList => to_payload(self.service.get_device_list().await?),
            PlugAction::GetDevice => {
                to_payload(self.service.get_device(&ip_address(request)?).await?)
            }
            PlugAction::ToggleDevice => {
                to_payload(self.service.toggle_device(&ip_address(request)?).await?)
            }
            PlugAction::SetDeviceState => {
                let address = ip_address(request)?;
                let on = request
                    .flag("power_state")
                    .ok_or(ValidationError::MissingPowerState)?;
                to_payload(self.service.set_device_state(&address, on).await?)
            }
        }
    }
}

/// The requested `ip_address` in canonical form, as plugs report it.
fn ip_address(request: &ParsedRequest) -> Result<String, ValidationError> {
    let raw = request
        .text("ip_address")
        .ok_or(ValidationError::MissingIpAddress)?;
    raw.trim()
        .parse::<IpAddr>()
        .map(|address| address.to_string())
        .map_err(|_| ValidationError::InvalidIpAddress(raw.to_string()))
}
