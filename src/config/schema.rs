use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckerConfig {
    /// CSV file whose first column holds the URLs to check
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_concurrency")]
    #[validate(range(min = 1))]
    pub concurrency: usize,

    /// Query string appended to every URL, e.g. `nocache=1`
    #[serde(default)]
    pub query: String,

    #[serde(default = "default_capacity")]
    #[validate(range(min = 1))]
    pub input_capacity: usize,

    #[serde(default = "default_capacity")]
    #[validate(range(min = 1))]
    pub output_capacity: usize,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            concurrency: default_concurrency(),
            query: String::new(),
            input_capacity: default_capacity(),
            output_capacity: default_capacity(),
            user_agent: None,
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputConfig {
    Log {
        #[serde(default = "default_log_path")]
        path: String,
    },
    Csv {
        path: String,
    },
    Jsonl {
        path: String,
    },
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig::Log {
            path: default_log_path(),
        }
    }
}

impl OutputConfig {
    pub fn path(&self) -> &str {
        match self {
            OutputConfig::Log { path } | OutputConfig::Csv { path } | OutputConfig::Jsonl { path } => {
                path
            }
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("./all.csv")
}

fn default_concurrency() -> usize {
    10
}

fn default_capacity() -> usize {
    10
}

fn default_log_path() -> String {
    "./exec.log".to_string()
}
