//! Invocation context: identity and timing of one function call, for logs.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::outcome::Family;

/// UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Unique identifier of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvocationId(uuid::Uuid);

impl Default for InvocationId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl InvocationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Context of one invocation. Never influences the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationContext {
    pub id: InvocationId,
    pub family: Family,
    pub started_at: Timestamp,
}

impl InvocationContext {
    /// Start a new invocation for `family` now.
    #[must_use]
    pub fn start(family: Family) -> Self {
        Self {
            id: InvocationId::new(),
            family,
            started_at: Utc::now(),
        }
    }

    /// Milliseconds elapsed since the invocation started.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}
