use super::Halt;
use crate::error::Result;
use crate::metrics::CollectStats;
use crate::output::ResultSink;
use crate::target::CheckResult;
use indicatif::ProgressBar;
use tokio::sync::mpsc;

/// Sole consumer of the output queue and sole writer of the result sink.
pub struct Collector {
    sink: Box<dyn ResultSink>,
    progress: ProgressBar,
    halt: Halt,
}

impl Collector {
    pub fn new(sink: Box<dyn ResultSink>, progress: ProgressBar, halt: Halt) -> Self {
        Self {
            sink,
            progress,
            halt,
        }
    }

    pub async fn run(mut self, mut results: mpsc::Receiver<CheckResult>) -> Result<CollectStats> {
        let mut stats = CollectStats::default();

        while let Some(result) = results.recv().await {
            if let Err(e) = self.sink.write(&result).await {
                log::error!("Cannot record result for {}: {}", result.target, e);
                self.halt.trigger();
                return Err(e);
            }
            stats.record(&result.outcome);
            self.progress.inc(1);
        }

        self.sink.close().await?;
        log::debug!(
            "Collector finished: {} recorded, {} failed",
            stats.recorded,
            stats.failed
        );
        Ok(stats)
    }
}
