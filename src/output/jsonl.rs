use super::{LogRecord, ResultSink, open_append};
use crate::error::Result;
use crate::target::CheckResult;
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One JSON object per line.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(open_append(path)?),
        })
    }
}

#[async_trait]
impl ResultSink for JsonlSink {
    async fn write(&mut self, result: &CheckResult) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &LogRecord::from(result))?;
        writeln!(self.writer)?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
