use crate::config::{PortSpec, ScanConfiguration};
use crate::error::{Result, ScanError};
use crate::types::ScanTarget;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Parse a comma-separated port list into a [`PortSpec::List`].
///
/// - whitespace around each token is ignored
/// - every token must be an integer in 1..=65535
/// - order and duplicates are kept as given
///
/// A single bad token fails the whole list.
pub fn parse_port_list(s: &str) -> Result<PortSpec> {
    let ports = s
        .split(',')
        .map(|tok| parse_port_str(tok.trim()))
        .collect::<Result<Vec<u16>>>()?;
    Ok(PortSpec::List(ports))
}

/// Expand the configured host and ports into the ordered target sequence.
///
/// Validates the configuration first so that a bad spec fails before any
/// socket is opened.
pub fn enumerate(config: &ScanConfiguration) -> Result<Targets> {
    config.validate()?;
    Ok(Targets::new(&config.target, &config.port_spec))
}

/// Lazy, finite sequence of [`ScanTarget`]s. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Targets {
    host: Arc<str>,
    ports: PortIter,
}

#[derive(Debug, Clone)]
enum PortIter {
    List { ports: Arc<[u16]>, next: usize },
    Range(RangeInclusive<u16>),
}

impl Targets {
    pub fn new(host: &str, spec: &PortSpec) -> Self {
        let ports = match spec {
            PortSpec::List(ports) => PortIter::List {
                ports: Arc::from(ports.as_slice()),
                next: 0,
            },
            PortSpec::Range { start, end } => PortIter::Range(*start..=*end),
        };
        Self {
            host: Arc::from(host),
            ports,
        }
    }
}

impl Iterator for Targets {
    type Item = ScanTarget;

    fn next(&mut self) -> Option<ScanTarget> {
        let port = match &mut self.ports {
            PortIter::List { ports, next } => {
                let p = *ports.get(*next)?;
                *next += 1;
                p
            }
            PortIter::Range(r) => r.next()?,
        };
        Some(ScanTarget::new(self.host.as_ref(), port))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match &self.ports {
            PortIter::List { ports, next } => ports.len() - *next,
            PortIter::Range(r) => r.len(),
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Targets {}

fn parse_port_str(s: &str) -> Result<u16> {
    let val: u32 = s.parse::<u32>().map_err(|e| ScanError::InvalidPortSpec {
        token: s.to_string(),
        reason: e.to_string(),
    })?;
    if val == 0 || val > 65535 {
        return Err(ScanError::InvalidPortSpec {
            token: s.to_string(),
            reason: format!("port out of range: {val}"),
        });
    }
    Ok(val as u16)
}
