use crate::error::Result;
use crate::target::CheckResult;
use async_trait::async_trait;
use chrono::Local;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;

pub mod csv;
pub mod jsonl;
pub mod text;

pub use self::csv::CsvSink;
pub use self::jsonl::JsonlSink;
pub use self::text::LogSink;

/// Durable destination for check results. Only the collector writes to it.
#[async_trait]
pub trait ResultSink: Send {
    async fn write(&mut self, result: &CheckResult) -> Result<()>;
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One persisted line, stamped at the moment it is written.
#[derive(Debug, Serialize)]
pub struct LogRecord<'a> {
    pub timestamp: String,
    pub url: &'a str,
    pub status: u16,
}

impl<'a> From<&'a CheckResult> for LogRecord<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S%.3f %z").to_string(),
            url: result.target.as_str(),
            status: result.outcome.code(),
        }
    }
}

/// Opens `path` for appending, creating it if needed. Never truncates.
pub(crate) fn open_append(path: &Path) -> Result<File> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}
