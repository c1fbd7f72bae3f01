use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use time::OffsetDateTime;

/// One host:port pair to probe. Immutable once enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    pub host: String,
    pub port: u16,
}

impl ScanTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, with IPv6 literals wrapped in brackets.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

/// Why a probe did not produce a clean open result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProbeErrorKind {
    Refused,
    TimedOut,
    Unreachable,
    Resolve,
    Other,
    /// Connected, but nothing arrived before the read deadline.
    BannerTimeout,
    /// Connected, but the banner read failed.
    BannerRead,
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeErrorKind::Refused => "refused",
            ProbeErrorKind::TimedOut => "timed out",
            ProbeErrorKind::Unreachable => "unreachable",
            ProbeErrorKind::Resolve => "resolve failed",
            ProbeErrorKind::Other => "connect failed",
            ProbeErrorKind::BannerTimeout => "banner timeout",
            ProbeErrorKind::BannerRead => "banner read failed",
        };
        f.write_str(s)
    }
}

/// Result of probing exactly one [`ScanTarget`].
///
/// Serializes as `{target, port, is_open, banner}`; `banner` is omitted when
/// absent or empty and `error` is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub target: ScanTarget,
    pub is_open: bool,
    pub banner: Option<Vec<u8>>,
    pub error: Option<ProbeErrorKind>,
}

impl ScanOutcome {
    pub fn open(target: ScanTarget, banner: Option<Vec<u8>>) -> Self {
        Self {
            target,
            is_open: true,
            banner,
            error: None,
        }
    }

    pub fn closed(target: ScanTarget, error: ProbeErrorKind) -> Self {
        Self {
            target,
            is_open: false,
            banner: None,
            error: Some(error),
        }
    }

    pub fn port(&self) -> u16 {
        self.target.port
    }

    /// Banner as lossy UTF-8, `None` when absent or empty.
    pub fn banner_text(&self) -> Option<String> {
        match self.banner.as_deref() {
            Some(b) if !b.is_empty() => Some(String::from_utf8_lossy(b).into_owned()),
            _ => None,
        }
    }
}

impl Serialize for ScanOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let banner = self.banner_text();
        let len = if banner.is_some() { 4 } else { 3 };
        let mut st = serializer.serialize_struct("ScanOutcome", len)?;
        st.serialize_field("target", &self.target.address())?;
        st.serialize_field("port", &self.target.port)?;
        st.serialize_field("is_open", &self.is_open)?;
        match banner {
            Some(b) => st.serialize_field("banner", &b)?,
            None => st.skip_field("banner")?,
        }
        st.end()
    }
}

/// Final report of one scan run.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub target: String,
    pub total_scanned: u64,
    /// Open outcomes in arrival order.
    pub open_ports: Vec<ScanOutcome>,
    pub elapsed: Duration,
    pub started_at: OffsetDateTime,
}

impl ScanSummary {
    pub fn open_count(&self) -> usize {
        self.open_ports.len()
    }
}
