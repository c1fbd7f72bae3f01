use crate::types::{ProbeErrorKind, ScanOutcome, ScanTarget};
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::{self, Instant};
use tracing::debug;

/// Size of the single banner read.
pub const BANNER_BUF_SIZE: usize = 1024;

/// Something that turns one target into one outcome.
///
/// Implementations must not fail: every error is encoded in the returned
/// [`ScanOutcome`].
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    async fn probe(&self, target: ScanTarget) -> ScanOutcome;
}

/// TCP connect probe with optional banner grab.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    pub timeout: Duration,
    pub banner_grab: bool,
}

impl TcpProbe {
    pub fn new(timeout: Duration, banner_grab: bool) -> Self {
        Self {
            timeout,
            banner_grab,
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, target: ScanTarget) -> ScanOutcome {
        probe(target, self.timeout, self.banner_grab).await
    }
}

/// Probe a single target.
///
/// - resolve and connect under one `timeout` deadline
/// - when `banner_grab` is set, read once (up to [`BANNER_BUF_SIZE`] bytes)
///   with a deadline of `timeout` counted from the moment of connection
/// - a banner timeout or read error keeps the port open, without banner
///
/// The stream is owned by this function and dropped before it returns.
pub async fn probe(target: ScanTarget, timeout: Duration, banner_grab: bool) -> ScanOutcome {
    let stream = match time::timeout(timeout, connect(&target)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(kind)) => {
            debug!(target = %target, reason = %kind, "closed");
            return ScanOutcome::closed(target, kind);
        }
        Err(_) => {
            debug!(target = %target, "closed (connect timeout)");
            return ScanOutcome::closed(target, ProbeErrorKind::TimedOut);
        }
    };
    let connected_at = Instant::now();

    if !banner_grab {
        drop(stream);
        debug!(target = %target, "open");
        return ScanOutcome::open(target, None);
    }

    match read_banner(stream, connected_at + timeout).await {
        Ok(banner) => {
            debug!(target = %target, bytes = banner.len(), "open");
            ScanOutcome::open(target, Some(banner))
        }
        Err(kind) => {
            debug!(target = %target, reason = %kind, "open, no banner");
            ScanOutcome {
                error: Some(kind),
                ..ScanOutcome::open(target, None)
            }
        }
    }
}

/// Resolve the host and try each address in turn, keeping the last error.
async fn connect(target: &ScanTarget) -> Result<TcpStream, ProbeErrorKind> {
    let addrs = lookup_host((target.host.as_str(), target.port))
        .await
        .map_err(|_| ProbeErrorKind::Resolve)?;

    let mut last = ProbeErrorKind::Resolve;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last = classify(&e),
        }
    }
    Err(last)
}

/// One read; zero bytes (clean close) counts as an empty banner.
async fn read_banner(mut stream: TcpStream, deadline: Instant) -> Result<Vec<u8>, ProbeErrorKind> {
    let mut buf = vec![0u8; BANNER_BUF_SIZE];
    match time::timeout_at(deadline, stream.read(&mut buf)).await {
        Ok(Ok(n)) => {
            buf.truncate(n);
            Ok(buf)
        }
        Ok(Err(_)) => Err(ProbeErrorKind::BannerRead),
        Err(_) => Err(ProbeErrorKind::BannerTimeout),
    }
}

fn classify(e: &io::Error) -> ProbeErrorKind {
    match e.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            ProbeErrorKind::Refused
        }
        io::ErrorKind::TimedOut => ProbeErrorKind::TimedOut,
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            ProbeErrorKind::Unreachable
        }
        _ => ProbeErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_and_unreachable_are_classified() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        assert_eq!(classify(&refused), ProbeErrorKind::Refused);
        let unreachable = io::Error::from(io::ErrorKind::HostUnreachable);
        assert_eq!(classify(&unreachable), ProbeErrorKind::Unreachable);
        let other = io::Error::other("boom");
        assert_eq!(classify(&other), ProbeErrorKind::Other);
    }

    #[tokio::test]
    async fn unresolvable_host_is_closed() {
        let t = ScanTarget::new("no-such-host.invalid", 80);
        let out = probe(t, Duration::from_secs(2), false).await;
        assert!(!out.is_open);
        assert!(out.banner.is_none());
        assert!(out.error.is_some());
    }
}
