use super::{LogRecord, ResultSink, open_append};
use crate::error::Result;
use crate::target::CheckResult;
use async_trait::async_trait;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;

/// Plain text log: `[timestamp] url=<u> status=<code>`.
pub struct LogSink {
    writer: LineWriter<File>,
}

impl LogSink {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: LineWriter::new(open_append(path)?),
        })
    }
}

#[async_trait]
impl ResultSink for LogSink {
    async fn write(&mut self, result: &CheckResult) -> Result<()> {
        let record = LogRecord::from(result);
        writeln!(
            self.writer,
            "[{}] url={} status={}",
            record.timestamp, record.url, record.status
        )?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
