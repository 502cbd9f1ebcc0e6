use super::Halt;
use crate::fetcher::Fetcher;
use crate::metrics::DispatchStats;
use crate::metrics::stage::InFlight;
use crate::target::{CheckResult, RequestTarget, StatusOutcome};
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Worker pool between the input and output queues.
pub struct Dispatcher {
    fetcher: Arc<dyn Fetcher>,
    concurrency: usize,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Checks targets until the input queue is closed and drained, or until
    /// `halt` fires. Requests already in flight always run to completion.
    ///
    /// `results` is the only sender of the output queue; it is dropped,
    /// closing the queue, once no task is left in flight.
    pub async fn run(
        self,
        targets: mpsc::Receiver<RequestTarget>,
        results: mpsc::Sender<CheckResult>,
        halt: Halt,
    ) -> DispatchStats {
        let in_flight = InFlight::default();
        let fetcher = &*self.fetcher;
        let results_tx = &results;
        let counter = &in_flight;

        ReceiverStream::new(targets)
            .take_until(halt.triggered())
            .for_each_concurrent(self.concurrency, move |target| {
                let guard = counter.enter();
                async move {
                    let _guard = guard;
                    let outcome = check(fetcher, &target).await;
                    if let Err(unsent) = results_tx.send(CheckResult::new(target, outcome)).await {
                        log::warn!("Output queue closed, discarding result for {}", unsent.0.target);
                    }
                }
            })
            .await;

        debug_assert_eq!(in_flight.current(), 0);
        let stats = in_flight.stats();
        drop(results);

        log::debug!(
            "Dispatcher finished: {} dispatched, peak {} in flight",
            stats.dispatched,
            stats.peak_in_flight
        );
        stats
    }
}

async fn check(fetcher: &dyn Fetcher, target: &RequestTarget) -> StatusOutcome {
    match fetcher.fetch(target).await {
        Ok(code) => StatusOutcome::Code(code),
        Err(e) => {
            log::debug!("GET {} failed: {}", target, e);
            StatusOutcome::Failed
        }
    }
}
