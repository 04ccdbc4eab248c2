//! A plug simulator answering discovery and commands on loopback.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

use crate::cipher;
use crate::transport::frame;

/// Simulated plug sharing one port number between UDP and TCP.
pub struct FakePlug {
    address: SocketAddr,
    relay: Arc<AtomicBool>,
    probes: Arc<AtomicUsize>,
}

impl FakePlug {
    pub async fn start(alias: &str, on: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let udp = UdpSocket::bind(address).await.unwrap();

        let relay = Arc::new(AtomicBool::new(on));
        let probes = Arc::new(AtomicUsize::new(0));
        let alias = alias.to_string();

        {
            let relay = Arc::clone(&relay);
            let probes = Arc::clone(&probes);
            let alias = alias.clone();
            tokio::spawn(async move {
                let mut buf = [0_u8; 512];
                while let Ok((_, source)) = udp.recv_from(&mut buf).await {
                    probes.fetch_add(1, Ordering::SeqCst);
                    let reply = sysinfo(&alias, relay.load(Ordering::SeqCst));
                    let _ = udp.send_to(&cipher::encrypt(&reply), source).await;
                }
            });
        }
        {
            let relay = Arc::clone(&relay);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    serve(stream, &alias, &relay).await;
                }
            });
        }

        Self {
            address,
            relay,
            probes,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn port(&self) -> u16 {
        self.address.port()
    }

    pub fn is_on(&self) -> bool {
        self.relay.load(Ordering::SeqCst)
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

async fn serve(mut stream: TcpStream, alias: &str, relay: &AtomicBool) {
    let mut len = [0_u8; 4];
    if stream.read_exact(&mut len).await.is_err() {
        return;
    }
    let mut request = vec![0_u8; u32::from_be_bytes(len) as usize];
    if stream.read_exact(&mut request).await.is_err() {
        return;
    }
    let request: Value = serde_json::from_slice(&cipher::decrypt(&request)).unwrap();

    let reply = match request["system"]["set_relay_state"]["state"].as_u64() {
        Some(state) => {
            relay.store(state == 1, Ordering::SeqCst);
            json!({"system": {"set_relay_state": {"err_code": 0}}})
                .to_string()
                .into_bytes()
        }
        None => sysinfo(alias, relay.load(Ordering::SeqCst)),
    };
    let _ = stream
        .write_all(&frame(&cipher::encrypt(&reply)).unwrap())
        .await;
}

fn sysinfo(alias: &str, on: bool) -> Vec<u8> {
    json!({"system": {"get_sysinfo": {
        "alias": alias,
        "model": "HS100(EU)",
        "mac": "50:C7:BF:00:00:01",
        "deviceId": "8006FAKE",
        "sw_ver": "1.5.4",
        "hw_ver": "2.0",
        "relay_state": u8::from(on),
        "on_time": if on { 120 } else { 0 },
        "rssi": -48,
        "err_code": 0,
    }}})
    .to_string()
    .into_bytes()
}
