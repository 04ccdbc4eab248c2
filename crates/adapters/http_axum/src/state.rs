//! Shared application state for axum handlers.

use remotectl_app::function::FunctionRunner;
use remotectl_app::ports::{PlugConnector, RedfishConnector};
use remotectl_domain::outcome::Family;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the connectors themselves do not need
/// to be `Clone`; the runner only clones `Arc` handles.
pub struct AppState<RC, PC> {
    /// Runs one invocation per request.
    pub runner: FunctionRunner<RC, PC>,
    /// Family served at `/`.
    pub default_family: Family,
}

impl<RC, PC> Clone for AppState<RC, PC> {
    fn clone(&self) -> Self {
        Self {
            runner: self.runner.clone(),
            default_family: self.default_family,
        }
    }
}

impl<RC, PC> AppState<RC, PC>
where
    RC: RedfishConnector + 'static,
    PC: PlugConnector + 'static,
{
    pub fn new(runner: FunctionRunner<RC, PC>, default_family: Family) -> Self {
        Self {
            runner,
            default_family,
        }
    }
}
