use crate::types::ScanOutcome;
use tokio::sync::mpsc;

/// What the collector saw on the results stream.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Every outcome received, open or not.
    pub total: u64,
    /// Open outcomes in arrival order.
    pub open: Vec<ScanOutcome>,
}

/// Drain `outcomes` until the stream is closed, keeping open ports only.
///
/// Arrival order is kept as is; no sorting by port.
pub async fn collect(mut outcomes: mpsc::Receiver<ScanOutcome>) -> Collected {
    let mut out = Collected::default();
    while let Some(outcome) = outcomes.recv().await {
        out.total += 1;
        if outcome.is_open {
            out.open.push(outcome);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProbeErrorKind, ScanTarget};

    #[tokio::test]
    async fn keeps_open_in_arrival_order_and_counts_all() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(ScanOutcome::open(ScanTarget::new("h", 443), None)).await.unwrap();
        tx.send(ScanOutcome::closed(ScanTarget::new("h", 81), ProbeErrorKind::Refused))
            .await
            .unwrap();
        tx.send(ScanOutcome::open(ScanTarget::new("h", 22), None)).await.unwrap();
        drop(tx);

        let got = collect(rx).await;
        assert_eq!(got.total, 3);
        let ports: Vec<u16> = got.open.iter().map(|o| o.port()).collect();
        assert_eq!(ports, vec![443, 22]);
    }

    #[tokio::test]
    async fn empty_stream_yields_nothing() {
        let (tx, rx) = mpsc::channel::<ScanOutcome>(1);
        drop(tx);
        let got = collect(rx).await;
        assert_eq!(got.total, 0);
        assert!(got.open.is_empty());
    }
}
