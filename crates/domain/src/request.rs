//! Inbound request envelope and the parsed request handlers read from.

use serde_json::{Map, Value};

/// Raw inbound request as delivered by the function runtime.
///
/// Only the body is interpreted; method and headers are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub body: Option<Vec<u8>>,
    pub method: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestEnvelope {
    /// Envelope carrying only a body.
    pub fn from_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Size of the body in bytes, zero when absent.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}

/// Key selecting the action in every request.
pub const ACTION_KEY: &str = "action";

/// A request body parsed into a JSON object. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    fields: Map<String, Value>,
}

impl ParsedRequest {
    /// Request carrying only an action.
    pub fn with_action(action: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ACTION_KEY.to_string(), Value::String(action.into()));
        Self { fields }
    }

    /// Wrap an already parsed JSON object.
    #[must_use]
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The requested action, or `default` when the key is absent.
    ///
    /// Non-string values are rendered as JSON text so they still surface in
    /// an "Unknown action" message.
    #[must_use]
    pub fn action_or(&self, default: &str) -> String {
        match self.fields.get(ACTION_KEY) {
            None => default.to_string(),
            Some(Value::String(action)) => action.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// A present, non-null, non-empty field as text.
    ///
    /// Strings are taken as is, any other value is rendered as JSON text.
    #[must_use]
    pub fn rendered(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(value) if value.is_empty() => None,
            Value::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }

    /// A non-empty string field.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Truthiness of a present, non-null field.
    ///
    /// Booleans are taken as is, numbers are true when non-zero, strings,
    /// arrays and objects are true when non-empty.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::Bool(value) => Some(*value),
            Value::Number(number) => Some(number.as_f64().is_some_and(|n| n.abs() > 0.0)),
            Value::String(value) => Some(!value.is_empty()),
            Value::Array(values) => Some(!values.is_empty()),
            Value::Object(values) => Some(!values.is_empty()),
        }
    }
}
