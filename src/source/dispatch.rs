use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::debug;

use crate::history::{FetchCompletion, FetchRequest};

use super::{AlertSource, FetchError};

/// Run `request` against `source` on the current thread.
pub fn fetch_blocking(source: &dyn AlertSource, request: FetchRequest) -> FetchCompletion {
    let started = Instant::now();
    // hours_from_now == 0 asks for the source's default recent set
    let result = source.get_alerts(&request.policy, request.hours_from_now());
    let elapsed = started.elapsed();
    debug!(policy = %request.policy, "get_alerts took {:?}", elapsed);
    request.complete(result, elapsed)
}

/// Runs fetches on tokio's blocking pool and reports completions over a channel.
///
/// The UI loop owns the receiver and drains it between input events, so
/// completions are applied on the same context as user actions. Superseded
/// fetches are never aborted; the controller drops them on arrival.
pub struct FetchDispatcher {
    source: Arc<dyn AlertSource>,
    timeout: Duration,
    tx: mpsc::UnboundedSender<FetchCompletion>,
}

impl FetchDispatcher {
    pub fn new(
        source: Arc<dyn AlertSource>,
        timeout: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                source,
                timeout,
                tx,
            },
            rx,
        )
    }

    /// Spawn the fetch. Must be called from within a tokio runtime.
    pub fn dispatch(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let started = Instant::now();
            let worker = {
                let request = request.clone();
                tokio::task::spawn_blocking(move || fetch_blocking(source.as_ref(), request))
            };

            let completion = match tokio::time::timeout(timeout, worker).await {
                Ok(Ok(completion)) => completion,
                Ok(Err(e)) => request.complete(Err(FetchError::Worker(e.to_string())), started.elapsed()),
                Err(_) => request.complete(Err(FetchError::TimedOut(timeout)), started.elapsed()),
            };

            // Receiver gone means the view shut down
            let _ = tx.send(completion);
        });
    }
}
