//! Response encoder: serializes an [`Outcome`] into the family's envelope.
//!
//! Internally every dispatch yields one [`Outcome`]. Callers of the two
//! families still expect different failure shapes, so the shape is chosen
//! here and nowhere else:
//!
//! | Family | Success | Failure |
//! |--------|---------|---------|
//! | Redfish | payload | `{"error": msg}` |
//! | Plug | payload | `{"success": false, "error": msg}` (+ `available_actions` for unknown actions) |

use remotectl_domain::error::{ShimError, ValidationError};
use remotectl_domain::outcome::{Family, Outcome};
use serde_json::{Map, Value, json};

/// Build the JSON envelope for `outcome`.
#[must_use]
pub fn envelope(family: Family, outcome: Outcome) -> Value {
    match outcome {
        Ok(payload) => payload,
        Err(err) => failure(family, &err),
    }
}

/// Build and serialize the JSON envelope for `outcome`.
#[must_use]
pub fn encode(family: Family, outcome: Outcome) -> String {
    envelope(family, outcome).to_string()
}

fn failure(family: Family, err: &ShimError) -> Value {
    match family {
        Family::Redfish => json!({ "error": err.to_string() }),
        Family::Plug => {
            let mut body = Map::new();
            body.insert("success".to_string(), Value::Bool(false));
            body.insert("error".to_string(), Value::String(err.to_string()));
            if matches!(err, ShimError::Validation(ValidationError::UnknownAction(_))) {
                body.insert(
                    "available_actions".to_string(),
                    json!(family.available_actions()),
                );
            }
            Value::Object(body)
        }
    }
}
