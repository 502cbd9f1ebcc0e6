use super::Halt;
use crate::error::Result;
use crate::target::RequestTarget;
use tokio::sync::mpsc;

/// Turns raw records into request targets and feeds the input queue.
///
/// The producer holds the only sender of the input queue, so the queue is
/// closed exactly once: when [`Producer::run`] returns.
pub struct Producer {
    query: String,
    targets: mpsc::Sender<RequestTarget>,
    halt: Halt,
}

impl Producer {
    pub fn new(query: String, targets: mpsc::Sender<RequestTarget>, halt: Halt) -> Self {
        Self {
            query,
            targets,
            halt,
        }
    }

    /// Blocks on a full queue, so this must run on a blocking thread.
    ///
    /// Returns the number of targets enqueued. A source error halts the
    /// pipeline before the input queue is closed.
    pub fn run<I>(self, records: I) -> Result<u64>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut produced = 0;

        for record in records {
            let raw = match record {
                Ok(raw) => raw,
                Err(e) => {
                    log::error!("Stopping after {} records: {}", produced, e);
                    self.halt.trigger();
                    return Err(e);
                }
            };

            if raw.trim().is_empty() {
                continue;
            }

            let target = RequestTarget::new(&raw, &self.query);
            if self.targets.blocking_send(target).is_err() {
                log::debug!("Input queue closed by dispatcher after {} records", produced);
                break;
            }
            produced += 1;
        }

        log::debug!("Producer finished: {} targets queued", produced);
        Ok(produced)
    }
}
