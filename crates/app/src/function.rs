//! Function runner: one invocation end to end.
//!
//! Parses the envelope, dispatches the action in its own task under a
//! watchdog deadline and encodes whatever happened, panics included, into
//! the family's JSON envelope. Nothing escapes [`FunctionRunner::invoke`]
//! except a JSON string.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use remotectl_domain::error::ShimError;
use remotectl_domain::invocation::InvocationContext;
use remotectl_domain::outcome::{Family, Outcome};
use remotectl_domain::request::RequestEnvelope;
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;

use crate::dispatcher::{PlugDispatcher, RedfishDispatcher};
use crate::ports::{PlugConnector, PlugNetwork, RedfishConnector, RedfishCredentials};
use crate::request::parse_request;
use crate::response;
use crate::services::plug_service::PlugService;
use crate::services::redfish_service::RedfishService;
use crate::settings::FunctionSettings;

/// Runs invocations of both families against the configured connectors.
///
/// Cheap to clone; every invocation builds its own device handle.
pub struct FunctionRunner<RC, PC> {
    settings: Arc<FunctionSettings>,
    redfish: Arc<RC>,
    plug: Arc<PC>,
}

impl<RC, PC> Clone for FunctionRunner<RC, PC> {
    fn clone(&self) -> Self {
        Self {
            settings: Arc::clone(&self.settings),
            redfish: Arc::clone(&self.redfish),
            plug: Arc::clone(&self.plug),
        }
    }
}

impl<RC, PC> FunctionRunner<RC, PC>
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    pub fn new(settings: FunctionSettings, redfish: RC, plug: PC) -> Self {
        Self {
            settings: Arc::new(settings),
            redfish: Arc::new(redfish),
            plug: Arc::new(plug),
        }
    }

    /// Serve one request for `family` and return the encoded envelope.
    pub async fn invoke(&self, family: Family, envelope: RequestEnvelope) -> String {
        let context = InvocationContext::start(family);
        let span = tracing::info_span!("invocation", request_id = %context.id, %family);

        async move {
            tracing::info!(
                method = envelope.method.as_deref().unwrap_or("-"),
                headers = envelope.headers.len(),
                body_bytes = envelope.body_len(),
                "invocation started"
            );
            let outcome = self.run(family, envelope).await;
            match &outcome {
                Ok(_) => {
                    tracing::info!(elapsed_ms = context.elapsed_ms(), "invocation succeeded");
                }
                Err(err) => {
                    tracing::warn!(
                        elapsed_ms = context.elapsed_ms(),
                        error = %err,
                        "invocation failed"
                    );
                }
            }
            response::encode(family, outcome)
        }
        .instrument(span)
        .await
    }

    async fn run(&self, family: Family, envelope: RequestEnvelope) -> Outcome {
        let task = match family {
            Family::Redfish => {
                // Configuration is checked before the body is even looked at.
                let credentials = self.settings.redfish.credentials()?;
                let connector = Arc::clone(&self.redfish);
                tokio::spawn(run_redfish(connector, credentials, envelope).in_current_span())
            }
            Family::Plug => {
                let network = self.plug.open(&self.settings.plug);
                tokio::spawn(run_plug(network, envelope).in_current_span())
            }
        };
        supervise(task, self.settings.deadline).await
    }
}

async fn run_redfish<RC: RedfishConnector>(
    connector: Arc<RC>,
    credentials: RedfishCredentials,
    envelope: RequestEnvelope,
) -> Outcome {
    let transport = connector.connect(&credentials)?;
    let request = parse_request(&envelope, Family::Redfish);
    RedfishDispatcher::new(RedfishService::new(transport))
        .dispatch(&request)
        .await
}

async fn run_plug<N: PlugNetwork>(network: N, envelope: RequestEnvelope) -> Outcome {
    let request = parse_request(&envelope, Family::Plug);
    PlugDispatcher::new(PlugService::new(network))
        .dispatch(&request)
        .await
}

/// Await `task` for at most `deadline`, aborting it on expiry.
async fn supervise(mut task: JoinHandle<Outcome>, deadline: Duration) -> Outcome {
    match tokio::time::timeout(deadline, &mut task).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => Err(join_failure(err)),
        Err(_) => {
            task.abort();
            tracing::warn!(?deadline, "deadline exceeded, invocation aborted");
            Err(ShimError::Cancelled)
        }
    }
}

fn join_failure(err: JoinError) -> ShimError {
    if err.is_cancelled() {
        return ShimError::Cancelled;
    }
    match err.try_into_panic() {
        Ok(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "invocation panicked");
            ShimError::Unexpected(message)
        }
        Err(err) => ShimError::Unexpected(err.to_string()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
