//! Completion counting for a run.

use tokio::sync::{mpsc, oneshot};

/// A unit of work that finishes at most once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    /// Active processor, numbered from 1.
    Processor(usize),
    /// The passive-handler slot, completed when ingestion stops cleanly.
    Passive,
}

/// Spawn a counter that fires `done` once `total` units have completed.
///
/// When every sender is dropped first, `done` is dropped unfired.
pub(crate) fn spawn(total: usize) -> (mpsc::UnboundedSender<Unit>, oneshot::Receiver<()>) {
    let (unit_tx, mut unit_rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut completed = 0usize;
        let mut done_tx = Some(done_tx);
        if total == 0 {
            if let Some(tx) = done_tx.take() {
                let _ = tx.send(());
            }
        }
        while let Some(unit) = unit_rx.recv().await {
            completed += 1;
            log::debug!("supervisor: {:?} finished ({}/{})", unit, completed, total);
            if completed >= total {
                if let Some(tx) = done_tx.take() {
                    let _ = tx.send(());
                }
            }
        }
    });
    (unit_tx, done_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fires_after_all_units() {
        let (tx, mut done) = spawn(2);
        tx.send(Unit::Processor(1)).unwrap();
        tokio::task::yield_now().await;
        assert!(done.try_recv().is_err());
        tx.send(Unit::Passive).unwrap();
        done.await.unwrap();
    }

    #[tokio::test]
    async fn zero_total_fires_immediately() {
        let (_tx, done) = spawn(0);
        done.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_senders_leave_done_unfired() {
        let (tx, done) = spawn(2);
        tx.send(Unit::Processor(1)).unwrap();
        drop(tx);
        assert!(done.await.is_err());
    }
}
