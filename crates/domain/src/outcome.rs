//! Device families and the unified outcome of a dispatch.

use serde::{Deserialize, Serialize};

use crate::action::{PlugAction, RedfishAction};
use crate::error::ShimError;

/// Result of one dispatch: a JSON payload or the error that stopped it.
///
/// Both families produce this; their legacy response shapes are applied
/// only when the outcome is encoded.
pub type Outcome = Result<serde_json::Value, ShimError>;

/// A family of remote devices served by the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Server management controllers speaking Redfish.
    #[default]
    Redfish,
    /// Smart plugs on the local network.
    Plug,
}

impl Family {
    /// Action assumed when a request carries none (or no usable body).
    #[must_use]
    pub fn default_action(self) -> &'static str {
        match self {
            Self::Redfish => RedfishAction::SystemInfo.as_str(),
            Self::Plug => "",
        }
    }

    /// Wire names of every action the family accepts.
    #[must_use]
    pub fn available_actions(self) -> Vec<&'static str> {
        match self {
            Self::Redfish => RedfishAction::names(),
            Self::Plug => PlugAction::names(),
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redfish => f.write_str("redfish"),
            Self::Plug => f.write_str("plug"),
        }
    }
}

impl std::str::FromStr for Family {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redfish" => Ok(Self::Redfish),
            "plug" => Ok(Self::Plug),
            other => Err(UnknownFamily(other.to_string())),
        }
    }
}

/// A family name that is neither `redfish` nor `plug`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device family {0:?}")]
pub struct UnknownFamily(pub String);
