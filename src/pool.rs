use crate::probe::Probe;
use crate::types::{ScanOutcome, ScanTarget};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Fixed-size fan-out/fan-in pool of probe workers.
///
/// Targets go through one bounded task queue shared by all workers, so each
/// target is taken by exactly one worker. Outcomes go to a results channel
/// that closes only after every worker has finished.
pub struct WorkerPool<P> {
    workers: usize,
    queue_capacity: usize,
    probe: Arc<P>,
}

impl<P: Probe> WorkerPool<P> {
    pub fn new(workers: usize, queue_capacity: usize, probe: P) -> Self {
        Self {
            workers: workers.max(1),
            queue_capacity: queue_capacity.max(1),
            probe: Arc::new(probe),
        }
    }

    /// Start the feeder and the workers and return the results stream.
    ///
    /// The feeder blocks on a full queue and closes it once `tasks` is
    /// exhausted. The returned receiver yields `None` after the last worker
    /// has exited.
    pub fn run<I>(self, tasks: I) -> mpsc::Receiver<ScanOutcome>
    where
        I: IntoIterator<Item = ScanTarget>,
        I::IntoIter: Send + 'static,
    {
        let (task_tx, task_rx) = mpsc::channel::<ScanTarget>(self.queue_capacity);
        let (result_tx, result_rx) = mpsc::channel::<ScanOutcome>(self.queue_capacity);
        let task_rx = Arc::new(Mutex::new(task_rx));

        let mut set = JoinSet::new();
        for id in 0..self.workers {
            set.spawn(worker(
                id,
                task_rx.clone(),
                result_tx.clone(),
                self.probe.clone(),
            ));
        }

        let tasks = tasks.into_iter();
        tokio::spawn(async move {
            let mut fed = 0u64;
            for target in tasks {
                if task_tx.send(target).await.is_err() {
                    warn!("task queue closed before all targets were fed");
                    break;
                }
                fed += 1;
            }
            debug!(fed, "task queue closed");
        });

        // Fan-in barrier: our sender lives until every worker has joined.
        tokio::spawn(async move {
            while let Some(res) = set.join_next().await {
                if let Err(e) = res {
                    warn!("worker aborted: {e}");
                }
            }
            drop(result_tx);
        });

        result_rx
    }
}

async fn worker<P: Probe>(
    id: usize,
    tasks: Arc<Mutex<mpsc::Receiver<ScanTarget>>>,
    results: mpsc::Sender<ScanOutcome>,
    probe: Arc<P>,
) {
    let mut done = 0u64;
    loop {
        // Lock only for the dequeue, never across the probe.
        let next = tasks.lock().await.recv().await;
        let Some(target) = next else { break };
        let outcome = probe.probe(target).await;
        if results.send(outcome).await.is_err() {
            warn!(worker = id, "results stream dropped, stopping");
            break;
        }
        done += 1;
    }
    debug!(worker = id, done, "worker finished");
}
