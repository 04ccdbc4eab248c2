//! In-memory port implementations shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use remotectl_domain::error::DeviceError;
use remotectl_domain::plug::PlugInfo;
use serde_json::Value;

use crate::ports::{
    PlugConnector, PlugNetwork, RedfishConnector, RedfishCredentials, RedfishTransport,
};
use crate::settings::PlugSettings;

/// One request seen by a [`StubTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Canned controller: each path answers with a fixed result.
#[derive(Clone, Default)]
pub struct StubTransport {
    routes: HashMap<String, Result<Value, DeviceError>>,
    panics: HashSet<String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl StubTransport {
    pub fn with(mut self, path: &str, value: Value) -> Self {
        self.routes.insert(path.to_string(), Ok(value));
        self
    }

    pub fn failing(mut self, path: &str, err: DeviceError) -> Self {
        self.routes.insert(path.to_string(), Err(err));
        self
    }

    pub fn panicking(mut self, path: &str) -> Self {
        self.panics.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, DeviceError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        assert!(!self.panics.contains(path), "controller exploded");
        self.routes.get(path).cloned().unwrap_or_else(|| {
            Err(DeviceError::request_failed(format!(
                "HTTP status client error (404 Not Found) for {path}"
            )))
        })
    }
}

impl RedfishTransport for StubTransport {
    async fn get(&self, path: &str) -> Result<Value, DeviceError> {
        self.respond("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, DeviceError> {
        self.respond("POST", path, Some(body))
    }
}

/// Connector handing out clones of one [`StubTransport`].
#[derive(Clone, Default)]
pub struct StubRedfishConnector {
    pub transport: StubTransport,
    connects: Arc<AtomicUsize>,
}

impl StubRedfishConnector {
    pub fn new(transport: StubTransport) -> Self {
        Self {
            transport,
            connects: Arc::default(),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl RedfishConnector for StubRedfishConnector {
    type Transport = StubTransport;

    fn connect(&self, _credentials: &RedfishCredentials) -> Result<StubTransport, DeviceError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(self.transport.clone())
    }
}

/// How a [`StubNetwork`] behaves when scanning.
#[derive(Clone, Default)]
pub enum Behavior {
    #[default]
    Answer,
    Fail(DeviceError),
    Hang,
    Panic,
}

/// In-memory LAN of plugs keyed by address.
#[derive(Clone, Default)]
pub struct StubNetwork {
    plugs: Arc<Mutex<BTreeMap<String, PlugInfo>>>,
    commands: Arc<Mutex<Vec<(String, bool)>>>,
    behavior: Behavior,
}

impl StubNetwork {
    pub fn with(self, plug: PlugInfo) -> Self {
        self.plugs
            .lock()
            .unwrap()
            .insert(plug.address.clone(), plug);
        self
    }

    pub fn failing(mut self, err: DeviceError) -> Self {
        self.behavior = Behavior::Fail(err);
        self
    }

    pub fn hanging(mut self) -> Self {
        self.behavior = Behavior::Hang;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.behavior = Behavior::Panic;
        self
    }

    pub fn commands(&self) -> Vec<(String, bool)> {
        self.commands.lock().unwrap().clone()
    }
}

impl PlugNetwork for StubNetwork {
    async fn discover(&self, target: Option<&str>) -> Result<Vec<PlugInfo>, DeviceError> {
        match &self.behavior {
            Behavior::Answer => {}
            Behavior::Fail(err) => return Err(err.clone()),
            Behavior::Hang => std::future::pending::<()>().await,
            Behavior::Panic => panic!("plug network exploded"),
        }
        let plugs = self.plugs.lock().unwrap();
        Ok(plugs
            .values()
            .filter(|plug| target.is_none_or(|address| plug.address == address))
            .cloned()
            .collect())
    }

    async fn refresh(&self, address: &str) -> Result<PlugInfo, DeviceError> {
        self.plugs
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| DeviceError::new(format!("connection refused by {address}")))
    }

    async fn set_power(&self, address: &str, on: bool) -> Result<(), DeviceError> {
        self.commands.lock().unwrap().push((address.to_string(), on));
        if let Some(plug) = self.plugs.lock().unwrap().get_mut(address) {
            plug.is_on = on;
        }
        Ok(())
    }
}

/// Connector handing out clones of one [`StubNetwork`].
#[derive(Clone, Default)]
pub struct StubPlugConnector {
    pub network: StubNetwork,
}

impl PlugConnector for StubPlugConnector {
    type Network = StubNetwork;

    fn open(&self, _settings: &PlugSettings) -> StubNetwork {
        self.network.clone()
    }
}

pub fn plug(address: &str, model: &str, is_on: bool) -> PlugInfo {
    PlugInfo {
        address: address.to_string(),
        alias: format!("Plug {address}"),
        model: model.to_string(),
        mac: "50:C7:BF:00:00:01".to_string(),
        device_id: Some("8006".to_string()),
        software_version: Some("1.5.4".to_string()),
        hardware_version: Some("2.0".to_string()),
        is_on,
        rssi: Some(-52),
        on_time: Some(if is_on { 3600 } else { 0 }),
    }
}
