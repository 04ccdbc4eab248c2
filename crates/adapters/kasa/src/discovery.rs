//! UDP discovery: broadcast an encrypted `get_sysinfo` and collect replies.

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use remotectl_domain::plug::PlugInfo;
use tokio::net::UdpSocket;
use tokio::time::Instant;

use crate::error::KasaError;
use crate::{cipher, protocol};

/// Number of times the probe is sent; UDP may drop any of them.
const PROBE_REPEAT: usize = 3;

/// Largest datagram read from a plug.
const MAX_DATAGRAM: usize = 4096;

/// Probe `destination` and collect every plug answering within `wait`.
///
/// Replies are keyed by source IP, so a plug answering several probes is
/// reported once. Replies that cannot be decoded are skipped.
///
/// # Errors
///
/// Fails only when the socket cannot be set up or the probe cannot be
/// sent.
pub async fn scan(destination: SocketAddr, wait: Duration) -> Result<Vec<PlugInfo>, KasaError> {
    let bind: SocketAddr = if destination.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(bind).await?;
    socket.set_broadcast(true)?;

    let probe = cipher::encrypt(&protocol::get_sysinfo());
    for _ in 0..PROBE_REPEAT {
        socket.send_to(&probe, destination).await?;
    }
    tracing::debug!(%destination, ?wait, "discovery probe sent");

    let deadline = Instant::now() + wait;
    let mut found = BTreeMap::new();
    let mut buf = vec![0_u8; MAX_DATAGRAM];
    loop {
        let received = tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await;
        let (len, source) = match received {
            Err(_elapsed) => break,
            Ok(Err(err)) => {
                tracing::debug!(%err, "discovery receive failed, stopping scan");
                break;
            }
            Ok(Ok(datagram)) => datagram,
        };

        let address = source.ip().to_string();
        if found.contains_key(&address) {
            continue;
        }
        match protocol::parse_sysinfo(&address, &cipher::decrypt(&buf[..len])) {
            Ok(plug) => {
                tracing::debug!(%address, model = %plug.model, "plug answered");
                found.insert(address, plug);
            }
            Err(err) => tracing::warn!(%address, %err, "skipping malformed discovery reply"),
        }
    }

    Ok(found.into_values().collect())
}
