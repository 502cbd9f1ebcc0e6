use super::{LogRecord, ResultSink, open_append};
use crate::error::Result;
use crate::target::CheckResult;
use async_trait::async_trait;
use std::fs::File;
use std::path::Path;

pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn new(path: &Path) -> Result<Self> {
        let file = open_append(path)?;
        let empty = file.metadata()?.len() == 0;
        let writer = csv::WriterBuilder::new()
            .has_headers(empty)
            .from_writer(file);

        Ok(Self { writer })
    }
}

#[async_trait]
impl ResultSink for CsvSink {
    async fn write(&mut self, result: &CheckResult) -> Result<()> {
        self.writer.serialize(LogRecord::from(result))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
