//! TCP command channel: one length-prefixed, encrypted request and reply.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::cipher;
use crate::error::KasaError;

/// Largest reply accepted from a plug.
pub const MAX_FRAME: usize = 64 * 1024;

/// Prefix `payload` with its big-endian length.
///
/// # Errors
///
/// Fails with [`KasaError::FrameTooLarge`] above [`MAX_FRAME`].
pub fn frame(payload: &[u8]) -> Result<Vec<u8>, KasaError> {
    if payload.len() > MAX_FRAME {
        return Err(KasaError::FrameTooLarge(payload.len()));
    }
    let len = u32::try_from(payload.len()).map_err(|_| KasaError::FrameTooLarge(payload.len()))?;
    let mut framed = Vec::with_capacity(4 + payload.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(payload);
    Ok(framed)
}

/// Send `request` to the plug at `address` and return its decrypted reply.
///
/// # Errors
///
/// Fails on socket errors, oversized frames, or when the exchange takes
/// longer than `timeout`.
pub async fn query(
    address: SocketAddr,
    request: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, KasaError> {
    tokio::time::timeout(timeout, exchange(address, request))
        .await
        .map_err(|_| KasaError::Timeout {
            address: address.to_string(),
            timeout,
        })?
}

async fn exchange(address: SocketAddr, request: &[u8]) -> Result<Vec<u8>, KasaError> {
    let mut stream = TcpStream::connect(address).await?;
    stream.write_all(&frame(&cipher::encrypt(request))?).await?;

    let mut len = [0_u8; 4];
    stream.read_exact(&mut len).await?;
    let len = u32::from_be_bytes(len) as usize;
    if len > MAX_FRAME {
        return Err(KasaError::FrameTooLarge(len));
    }

    let mut reply = vec![0_u8; len];
    stream.read_exact(&mut reply).await?;
    tracing::trace!(%address, bytes = len, "plug replied");
    Ok(cipher::decrypt(&reply))
}
