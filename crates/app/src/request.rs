//! Request parser: turns an inbound envelope into a [`ParsedRequest`].

use remotectl_domain::outcome::Family;
use remotectl_domain::request::{ParsedRequest, RequestEnvelope};
use serde_json::Value;

/// Parse the envelope body as a JSON object.
///
/// Never fails: an absent, empty or unparsable body, or JSON that is not an
/// object, yields a request for the family's default action.
#[must_use]
pub fn parse_request(envelope: &RequestEnvelope, family: Family) -> ParsedRequest {
    let fallback = || ParsedRequest::with_action(family.default_action());

    let Some(body) = envelope.body.as_deref().filter(|body| !body.is_empty()) else {
        return fallback();
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => ParsedRequest::from_map(fields),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "request body is not a JSON object");
            fallback()
        }
        Err(err) => {
            tracing::debug!(%err, "request body is not valid JSON");
            fallback()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
