//! Snapshot delivery for terminal front-ends

use crate::progress::reporter::ProgressReporter;
use checkin_application::SessionSnapshot;
use std::future::Future;
use tokio::sync::mpsc;

/// Consumes controller snapshots on the caller's task
///
/// Busy snapshots drive the spinner; settled ones are buffered until the
/// caller drains them for rendering.
pub struct SnapshotPump {
    rx: mpsc::UnboundedReceiver<SessionSnapshot>,
    progress: ProgressReporter,
    settled: Vec<SessionSnapshot>,
}

impl SnapshotPump {
    pub fn new(rx: mpsc::UnboundedReceiver<SessionSnapshot>, progress: ProgressReporter) -> Self {
        Self {
            rx,
            progress,
            settled: Vec::new(),
        }
    }

    fn accept(
        progress: &ProgressReporter,
        settled: &mut Vec<SessionSnapshot>,
        snapshot: SessionSnapshot,
    ) {
        progress.on_state(snapshot.state);
        if !snapshot.state.is_busy() {
            settled.push(snapshot);
        }
    }

    fn receive_pending(&mut self) {
        while let Ok(snapshot) = self.rx.try_recv() {
            Self::accept(&self.progress, &mut self.settled, snapshot);
        }
    }

    /// Await `op`, handling snapshots published while it runs
    ///
    /// Snapshots `op` published before resolving are handled before this
    /// returns, so the spinner never outlives the request.
    pub async fn run<F: Future>(&mut self, op: F) -> F::Output {
        tokio::pin!(op);
        let output = loop {
            tokio::select! {
                biased;
                Some(snapshot) = self.rx.recv() => {
                    Self::accept(&self.progress, &mut self.settled, snapshot);
                }
                output = &mut op => break output,
            }
        };
        self.receive_pending();
        output
    }

    /// Settled snapshots received so far, oldest first
    pub fn drain(&mut self) -> Vec<SessionSnapshot> {
        self.receive_pending();
        std::mem::take(&mut self.settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_application::SessionState;

    fn snapshot(state: SessionState) -> SessionSnapshot {
        SessionSnapshot {
            state,
            ..SessionSnapshot::idle()
        }
    }

    #[tokio::test]
    async fn test_busy_snapshots_are_not_buffered() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut pump = SnapshotPump::new(rx, ProgressReporter::hidden());

        let value = pump
            .run(async {
                tx.send(snapshot(SessionState::Loading)).unwrap();
                tx.send(snapshot(SessionState::Active)).unwrap();
                7
            })
            .await;
        assert_eq!(value, 7);

        tx.send(snapshot(SessionState::Submitting)).unwrap();
        tx.send(snapshot(SessionState::Completed)).unwrap();

        let states: Vec<_> = pump.drain().into_iter().map(|s| s.state).collect();
        assert_eq!(states, vec![SessionState::Active, SessionState::Completed]);
        assert!(pump.drain().is_empty());
    }

    #[tokio::test]
    async fn test_spinner_cleared_when_run_returns() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut pump = SnapshotPump::new(rx, ProgressReporter::new());

        pump.run(async {
            tx.send(snapshot(SessionState::Submitting)).unwrap();
            tokio::task::yield_now().await;
            tx.send(snapshot(SessionState::Completed)).unwrap();
        })
        .await;

        assert!(!pump.progress.is_spinning());
        let states: Vec<_> = pump.drain().into_iter().map(|s| s.state).collect();
        assert_eq!(states, vec![SessionState::Completed]);
    }
}
