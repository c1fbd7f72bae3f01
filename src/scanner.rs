use crate::collector;
use crate::config::{ScanConfiguration, TASK_QUEUE_CAPACITY};
use crate::error::Result;
use crate::pool::WorkerPool;
use crate::ports;
use crate::probe::{Probe, TcpProbe};
use crate::types::ScanSummary;
use ::time::OffsetDateTime;
use tokio::time::Instant;
use tracing::{info, warn};

/// Scan the configured host and ports with TCP connects.
///
/// - validates and enumerates first; a bad port spec fails here, before any
///   socket is opened
/// - runs exactly `worker_count` workers over a bounded task queue
/// - per-port failures never surface as errors, they only lower the open count
///
/// The scan always runs to completion; only single connects and reads time out.
pub async fn execute(config: &ScanConfiguration) -> Result<ScanSummary> {
    let probe = TcpProbe::new(config.timeout, config.banner_grab);
    execute_with(config, probe).await
}

/// Same as [`execute`] with a caller-supplied probe.
pub async fn execute_with<P: Probe>(config: &ScanConfiguration, probe: P) -> Result<ScanSummary> {
    let started_at = OffsetDateTime::now_utc();
    let start = Instant::now();

    let targets = ports::enumerate(config)?;
    let planned = config.port_spec.len() as u64;
    if config.port_spec.is_empty() {
        warn!(target = %config.target, "port spec selects no ports");
    }
    info!(
        target = %config.target,
        ports = planned,
        workers = config.worker_count,
        timeout_s = config.timeout.as_secs_f64(),
        banner = config.banner_grab,
        "scan started"
    );

    let pool = WorkerPool::new(config.worker_count, TASK_QUEUE_CAPACITY, probe);
    let results = pool.run(targets);
    let collected = collector::collect(results).await;

    if collected.total != planned {
        warn!(planned, received = collected.total, "outcome count mismatch");
    }

    let elapsed = start.elapsed();
    info!(
        open = collected.open.len(),
        scanned = collected.total,
        elapsed_s = elapsed.as_secs_f64(),
        "scan finished"
    );

    Ok(ScanSummary {
        target: config.target.clone(),
        total_scanned: collected.total,
        open_ports: collected.open,
        elapsed,
        started_at,
    })
}
