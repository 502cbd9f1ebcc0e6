//! Producer → input queue → dispatcher → output queue → collector.
//!
//! Each queue has exactly one owner allowed to close it: the producer
//! closes the input queue once the source is exhausted, the dispatcher
//! closes the output queue once nothing is in flight. The collector's
//! drain-to-closed is what ends a run.

pub mod collector;
pub mod dispatcher;
pub mod producer;

pub use collector::Collector;
pub use dispatcher::Dispatcher;
pub use producer::Producer;

use crate::config::CheckerConfig;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::metrics::RunSummary;
use crate::output::ResultSink;
use futures::stream::{self, Stream, StreamExt};
use indicatif::ProgressBar;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};

/// Stops the dispatcher from taking new targets. In-flight requests still
/// finish and every queue still closes through its owner.
#[derive(Clone)]
pub struct Halt {
    tx: Arc<watch::Sender<bool>>,
}

impl Halt {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`Halt::trigger`] has been called, immediately if it
    /// already was.
    pub fn triggered(&self) -> impl Future<Output = ()> + Send + use<> {
        let mut rx = self.tx.subscribe();
        async move {
            let closed = rx.wait_for(|halted| *halted).await.is_err();
            if closed {
                futures::future::pending::<()>().await;
            }
        }
    }
}

impl Default for Halt {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub concurrency: usize,
    pub query: String,
    pub input_capacity: usize,
    pub output_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&CheckerConfig::default())
    }
}

impl From<&CheckerConfig> for PipelineSettings {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            query: config.query.clone(),
            input_capacity: config.input_capacity.max(1),
            output_capacity: config.output_capacity.max(1),
        }
    }
}

/// Coordinates one run. A halted pipeline stays halted; build a new one
/// for the next run.
pub struct Pipeline {
    settings: PipelineSettings,
    fetcher: Arc<dyn Fetcher>,
    halt: Halt,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            settings,
            fetcher,
            halt: Halt::new(),
        }
    }

    pub fn halt(&self) -> Halt {
        self.halt.clone()
    }

    /// Checks every record and waits for all three stages to finish.
    ///
    /// A source error is returned only after in-flight requests have
    /// drained and both queues are closed. The first Ctrl-C halts and
    /// drains, a second one cancels the requests still in flight.
    pub async fn run<I>(
        &self,
        records: I,
        sink: Box<dyn ResultSink>,
        progress: ProgressBar,
    ) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<String>> + Send + 'static,
    {
        let ctrl_c = stream::unfold((), |()| async {
            tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
        });
        self.run_until(records, sink, progress, Box::pin(ctrl_c)).await
    }

    /// Like [`Pipeline::run`], with interrupts taken from `interrupts`
    /// instead of Ctrl-C.
    pub async fn run_until<I, S>(
        &self,
        records: I,
        sink: Box<dyn ResultSink>,
        progress: ProgressBar,
        interrupts: S,
    ) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<String>> + Send + 'static,
        S: Stream<Item = ()> + Unpin,
    {
        let start = Instant::now();
        let (targets_tx, targets_rx) = mpsc::channel(self.settings.input_capacity);
        let (results_tx, results_rx) = mpsc::channel(self.settings.output_capacity);

        let producer = Producer::new(self.settings.query.clone(), targets_tx, self.halt.clone());
        let producer = tokio::task::spawn_blocking(move || producer.run(records));

        let dispatcher = Dispatcher::new(self.fetcher.clone(), self.settings.concurrency);
        let dispatcher = tokio::spawn(dispatcher.run(targets_rx, results_tx, self.halt.clone()));
        let cancel_dispatch = dispatcher.abort_handle();

        let collector = Collector::new(sink, progress, self.halt.clone());
        let collector = tokio::spawn(collector.run(results_rx));

        let stages = async { tokio::join!(producer, dispatcher, collector) };
        tokio::pin!(stages);

        let mut interrupts = interrupts.fuse();
        let mut interrupted = false;
        let mut cancelled = false;
        let (produced, dispatched, collected) = loop {
            tokio::select! {
                joined = &mut stages => break joined,
                Some(()) = interrupts.next(), if !cancelled => {
                    if interrupted {
                        // Dropping the dispatcher drops its requests and its
                        // output sender; the collector still drains what arrived.
                        log::warn!("Cancelling in-flight requests");
                        cancelled = true;
                        cancel_dispatch.abort();
                    } else {
                        log::warn!("Interrupted, waiting for in-flight requests to finish (Ctrl-C again to cancel)...");
                        interrupted = true;
                        self.halt.trigger();
                    }
                }
            }
        };

        let dispatched = match dispatched {
            Ok(stats) => Some(stats),
            Err(e) if e.is_cancelled() => None,
            Err(e) => return Err(Error::Internal(format!("dispatcher task: {}", e))),
        };
        let produced = produced.map_err(|e| Error::Internal(format!("producer task: {}", e)))?;
        let collected = collected.map_err(|e| Error::Internal(format!("collector task: {}", e)))?;

        let produced = produced?;
        let collected = collected?;

        let summary = RunSummary {
            produced,
            // A cancelled dispatcher only ever delivered what was recorded.
            dispatched: dispatched.map_or(collected.recorded, |d| d.dispatched),
            recorded: collected.recorded,
            failed: collected.failed,
            peak_in_flight: dispatched.map_or(0, |d| d.peak_in_flight),
            interrupted,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };

        log::info!(
            "Checked {} URLs in {:.2}s ({} without response)",
            summary.recorded,
            summary.elapsed_seconds,
            summary.failed
        );
        Ok(summary)
    }
}
