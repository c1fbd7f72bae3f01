use crate::error::{Result, ScanError};
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Bound of the task queue between the enumerator and the workers.
pub const TASK_QUEUE_CAPACITY: usize = 100;

/// Which ports to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSpec {
    /// Explicit ports, scanned in the given order.
    List(Vec<u16>),
    /// Closed range `start..=end`; empty when `start > end`.
    Range { start: u16, end: u16 },
}

impl PortSpec {
    /// Resolve the two CLI shapes: an explicit list wins over the range.
    pub fn from_parts(list: Option<&str>, start: u16, end: u16) -> Result<Self> {
        match list {
            Some(s) if !s.trim().is_empty() => crate::ports::parse_port_list(s),
            _ => Ok(PortSpec::Range { start, end }),
        }
    }

    /// Number of targets this spec enumerates to.
    pub fn len(&self) -> usize {
        match self {
            PortSpec::List(ports) => ports.len(),
            PortSpec::Range { start, end } if start <= end => (*end - *start) as usize + 1,
            PortSpec::Range { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

/// Immutable settings for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfiguration {
    pub target: String,
    pub port_spec: PortSpec,
    pub worker_count: usize,
    /// Applied to the connect and to the banner read alike.
    pub timeout: Duration,
    pub banner_grab: bool,
    pub output_mode: OutputMode,
}

impl ScanConfiguration {
    pub fn new(target: impl Into<String>, port_spec: PortSpec) -> Self {
        Self {
            target: target.into(),
            port_spec,
            worker_count: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            banner_grab: false,
            output_mode: OutputMode::Human,
        }
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_banner_grab(mut self, enabled: bool) -> Self {
        self.banner_grab = enabled;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Reject settings that would make the scan meaningless or hang.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(ScanError::InvalidConfig("target host is empty".into()));
        }
        if self.worker_count == 0 {
            return Err(ScanError::InvalidConfig(
                "worker count must be at least 1".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig("timeout must be positive".into()));
        }
        match &self.port_spec {
            // An inverted range enumerates nothing, so its bounds never reach a socket.
            PortSpec::Range { start, end } if start <= end && *start == 0 => {
                return Err(ScanError::InvalidPortSpec {
                    token: start.to_string(),
                    reason: "start port must be in 1-65535".into(),
                });
            }
            PortSpec::Range { .. } => {}
            PortSpec::List(ports) => {
                if let Some(p) = ports.iter().find(|p| **p == 0) {
                    return Err(ScanError::InvalidPortSpec {
                        token: p.to_string(),
                        reason: "port must be in 1-65535".into(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cfg = ScanConfiguration::new("localhost", PortSpec::Range { start: 1, end: 1024 });
        assert_eq!(cfg.worker_count, 100);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(!cfg.banner_grab);
        assert_eq!(cfg.output_mode, OutputMode::Human);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn explicit_list_takes_precedence() {
        let spec = PortSpec::from_parts(Some("22,80"), 1, 1024).unwrap();
        assert_eq!(spec, PortSpec::List(vec![22, 80]));
        let spec = PortSpec::from_parts(None, 5000, 5002).unwrap();
        assert_eq!(spec, PortSpec::Range { start: 5000, end: 5002 });
    }

    #[test]
    fn range_len_handles_inverted_and_full() {
        assert_eq!(PortSpec::Range { start: 10, end: 5 }.len(), 0);
        assert_eq!(PortSpec::Range { start: 1, end: 65535 }.len(), 65535);
        assert_eq!(PortSpec::Range { start: 7, end: 7 }.len(), 1);
    }

    #[test]
    fn zero_workers_and_zero_timeout_rejected() {
        let base = ScanConfiguration::new("localhost", PortSpec::List(vec![80]));
        assert!(base.clone().with_workers(0).validate().is_err());
        assert!(base.with_timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn port_zero_in_range_rejected() {
        let cfg = ScanConfiguration::new("localhost", PortSpec::Range { start: 0, end: 10 });
        assert!(matches!(
            cfg.validate(),
            Err(ScanError::InvalidPortSpec { .. })
        ));
        let cfg = ScanConfiguration::new("localhost", PortSpec::Range { start: 0, end: 0 });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_range_ending_at_zero_is_empty_not_error() {
        let cfg = ScanConfiguration::new("localhost", PortSpec::Range { start: 5, end: 0 });
        assert!(cfg.validate().is_ok());
        assert!(cfg.port_spec.is_empty());
        assert_eq!(crate::ports::enumerate(&cfg).unwrap().count(), 0);
    }
}
