//! Background worker thread. All network I/O runs off the UI thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each fetch
//! runs on its own short-lived thread, so a stalled request never holds up a
//! later one. A superseded request still completes and is discarded by the
//! controller on arrival.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use stockdash_core::{FetchError, SnapshotProvider, StockSnapshot, Ticker};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch { seq: u64, ticker: Ticker },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Fetched {
        seq: u64,
        outcome: Result<Option<StockSnapshot>, FetchError>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: Arc<dyn SnapshotProvider>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("stockdash-worker".into())
        .spawn(move || {
            worker_loop(provider, rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    provider: Arc<dyn SnapshotProvider>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    tracing::debug!(provider = provider.name(), "worker started");
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Fetch { seq, ticker }) => {
                dispatch_fetch(Arc::clone(&provider), seq, ticker, tx.clone());
            }
        }
    }
    // Fetch threads still running are detached; their sends fail once the UI is gone.
    tracing::debug!("worker stopped");
}

/// Run one fetch on its own thread and send the tagged outcome back.
fn dispatch_fetch(
    provider: Arc<dyn SnapshotProvider>,
    seq: u64,
    ticker: Ticker,
    tx: Sender<WorkerResponse>,
) {
    let fallback = tx.clone();
    let spawned = thread::Builder::new()
        .name(format!("stockdash-fetch-{seq}"))
        .spawn(move || {
            let outcome = provider.fetch(&ticker);
            // UI side may be gone.
            let _ = tx.send(WorkerResponse::Fetched { seq, outcome });
        });

    if let Err(err) = spawned {
        tracing::warn!(seq, error = %err, "failed to spawn fetch thread");
        let outcome = Err(FetchError::Client(format!("failed to start request: {err}")));
        let _ = fallback.send(WorkerResponse::Fetched { seq, outcome });
    }
}
