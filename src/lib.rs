pub mod config;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod target;

pub use config::{CheckerConfig, ConfigLoader, OutputConfig};
pub use error::{Error, Result};
pub use fetcher::{Fetcher, HttpFetcher};
pub use metrics::RunSummary;
pub use output::ResultSink;
pub use pipeline::{Halt, Pipeline, PipelineSettings};
pub use target::{CheckResult, RequestTarget, StatusOutcome};
