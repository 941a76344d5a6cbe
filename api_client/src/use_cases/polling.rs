use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// Completions buffered for a reader that falls behind.
pub const DEFAULT_BUFFER: usize = 16;

// Completed request from one poll tick; `sequence` is the tick that started it.
#[derive(Debug)]
pub struct PollUpdate<T> {
    pub sequence: u64,
    pub result: T,
}

// Re-issues a request on a fixed interval. Each tick's request runs as its own
// task and is never aborted by a later tick, so completions can arrive out of
// order. Dropping the poller stops new ticks; in-flight requests finish and
// their results are discarded. When the buffer is full, new completions are
// dropped until the reader catches up.
pub struct Poller<T> {
    updates: mpsc::Receiver<PollUpdate<T>>,
    ticker: JoinHandle<()>,
    newest_delivered: u64,
}

impl<T> Poller<T>
where
    T: Send + 'static,
{
    pub fn spawn<F, Fut>(every: Duration, request: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::with_buffer(every, DEFAULT_BUFFER, request)
    }

    pub fn with_buffer<F, Fut>(every: Duration, buffer: usize, request: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, updates) = mpsc::channel(buffer.max(1));
        let request = Arc::new(request);

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut sequence = 0u64;

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }
                sequence += 1;
                tracing::trace!(sequence, "poll tick");

                let in_flight = request();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = in_flight.await;
                    match tx.try_send(PollUpdate { sequence, result }) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::debug!(sequence, "poll buffer full; dropping result");
                        }
                        // Receiver gone means the poller was dropped.
                        Err(TrySendError::Closed(_)) => {}
                    }
                });
            }
        });

        Self {
            updates,
            ticker,
            newest_delivered: 0,
        }
    }

    // Completions waiting to be read.
    pub fn pending(&self) -> usize {
        self.updates.len()
    }

    // Next completion in arrival order, stale ones included.
    pub async fn recv(&mut self) -> Option<PollUpdate<T>> {
        let update = self.updates.recv().await?;
        self.newest_delivered = self.newest_delivered.max(update.sequence);
        Some(update)
    }

    // Next completion newer than anything already delivered; older ones are dropped.
    pub async fn recv_latest(&mut self) -> Option<PollUpdate<T>> {
        loop {
            let update = self.updates.recv().await?;
            if update.sequence > self.newest_delivered {
                self.newest_delivered = update.sequence;
                return Some(update);
            }
            tracing::debug!(
                sequence = update.sequence,
                newest = self.newest_delivered,
                "discarding stale poll result"
            );
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}
