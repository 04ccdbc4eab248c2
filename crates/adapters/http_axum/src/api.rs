//! Function endpoint handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use remotectl_app::ports::{PlugConnector, RedfishConnector};
use remotectl_domain::outcome::Family;
use remotectl_domain::request::RequestEnvelope;

use crate::state::AppState;

/// An encoded result envelope, always sent as `200 OK`.
pub struct FunctionResponse(pub String);

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.0,
        )
            .into_response()
    }
}

/// `ANY /redfish`
pub async fn redfish<RC, PC>(
    State(state): State<AppState<RC, PC>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> FunctionResponse
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    invoke(&state, Family::Redfish, &method, &headers, body).await
}

/// `ANY /plug`
pub async fn plug<RC, PC>(
    State(state): State<AppState<RC, PC>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> FunctionResponse
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    invoke(&state, Family::Plug, &method, &headers, body).await
}

/// `ANY /`, served by the configured default family.
pub async fn default_family<RC, PC>(
    State(state): State<AppState<RC, PC>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> FunctionResponse
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    invoke(&state, state.default_family, &method, &headers, body).await
}

async fn invoke<RC, PC>(
    state: &AppState<RC, PC>,
    family: Family,
    method: &Method,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> FunctionResponse
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    // An unreadable body (over the size limit, aborted) is treated as absent
    // so the request still ends in a JSON envelope.
    let body = body.unwrap_or_else(|rejection| {
        tracing::warn!(%rejection, "request body dropped");
        Bytes::new()
    });
    let envelope = envelope(method, headers, &body);
    FunctionResponse(state.runner.invoke(family, envelope).await)
}

/// Copy the parts of an HTTP request the runner cares about.
fn envelope(method: &Method, headers: &HeaderMap, body: &Bytes) -> RequestEnvelope {
    RequestEnvelope {
        body: (!body.is_empty()).then(|| body.to_vec()),
        method: Some(method.to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    }
}
