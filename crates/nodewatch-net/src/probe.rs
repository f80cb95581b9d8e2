//! TCP port probing.
//!
//! The probe's sense is inverted relative to "can I connect": an
//! established connection means something already listens there, so the
//! port is taken. A refused or timed-out connect is indistinguishable
//! from free — there is no separate error path for unreachable hosts.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

pub const DEFAULT_MIN_PORT: u16 = 2048;
pub const DEFAULT_MAX_PORT: u16 = 65500;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Cap on random draws before giving up.
const MAX_DRAWS: u32 = 1000;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("invalid port range {min}-{max}")]
    InvalidRange { min: u16, max: u16 },
    #[error("no port free on all hosts in {min}-{max} after {attempts} draws")]
    Exhausted { min: u16, max: u16, attempts: u32 },
}

/// Probe seam so tests can observe exactly which hosts get probed.
#[async_trait]
pub trait PortProbe: Send + Sync {
    /// True when nothing on `host` listens on `port`.
    async fn is_free(&self, host: &str, port: u16) -> bool;
}

/// Production probe: one real connect attempt per call.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    connect_timeout: Duration,
}

impl TcpProbe {
    pub fn new() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortProbe for TcpProbe {
    async fn is_free(&self, host: &str, port: u16) -> bool {
        match timeout(self.connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => false,
            _ => true,
        }
    }
}

/// True when `port` is free on every host.
///
/// Short-circuits: hosts after the first one with the port bound are
/// never probed.
pub async fn is_free_on_all<P: PortProbe + ?Sized>(probe: &P, port: u16, hosts: &[String]) -> bool {
    for host in hosts {
        if !probe.is_free(host, port).await {
            tracing::debug!(host = %host, port, "port already bound");
            return false;
        }
    }
    true
}

/// Draw random ports in `[min, max]` until one is free on every host.
///
/// The result is a point-in-time guarantee only; nothing stops another
/// process from binding the port between the probe and its use. The
/// search gives up after a fixed number of draws instead of spinning
/// forever on a saturated range.
pub async fn find_free_port<P: PortProbe + ?Sized>(
    probe: &P,
    hosts: &[String],
    min: u16,
    max: u16,
) -> Result<u16, ProbeError> {
    if min > max {
        return Err(ProbeError::InvalidRange { min, max });
    }

    for attempt in 0..MAX_DRAWS {
        let candidate = rand::thread_rng().gen_range(min..=max);
        if is_free_on_all(probe, candidate, hosts).await {
            tracing::debug!(port = candidate, attempt, "found free port");
            return Ok(candidate);
        }
    }

    Err(ProbeError::Exhausted {
        min,
        max,
        attempts: MAX_DRAWS,
    })
}
