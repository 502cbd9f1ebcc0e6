use crate::config::schema::{CheckerConfig, OutputConfig};
use crate::error::{Error, Result};
use crate::output::{CsvSink, JsonlSink, LogSink, ResultSink};
use std::fs;
use std::path::Path;
use validator::Validate;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CheckerConfig> {
        let config = Self::load_file(path.as_ref())?;
        Self::validate(config)
    }

    pub fn validate(config: CheckerConfig) -> Result<CheckerConfig> {
        config.validate().map_err(Error::Validation)?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<CheckerConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config: CheckerConfig = serde_json::from_str(&content)?;
                Ok(config)
            }
            Some("yaml") | Some("yml") => {
                let config: CheckerConfig = serde_yaml::from_str(&content)?;
                Ok(config)
            }
            Some("toml") => {
                let config: CheckerConfig = toml::from_str(&content)?;
                Ok(config)
            }
            _ => Err(Error::Config(format!(
                "Unsupported file extension: {}",
                path.display()
            ))),
        }
    }

    pub fn create_sink(output: &OutputConfig) -> Result<Box<dyn ResultSink>> {
        let path = Path::new(output.path());
        let sink: Box<dyn ResultSink> = match output {
            OutputConfig::Log { .. } => Box::new(LogSink::new(path)?),
            OutputConfig::Csv { .. } => Box::new(CsvSink::new(path)?),
            OutputConfig::Jsonl { .. } => Box::new(JsonlSink::new(path)?),
        };
        Ok(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn config_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_json_uses_defaults() {
        let file = config_file(".json", "{}");
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.input, Path::new("./all.csv"));
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.query, "");
        assert_eq!(config.input_capacity, 10);
        assert_eq!(config.output_capacity, 10);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn loads_yaml() {
        let file = config_file(
            ".yaml",
            "input: urls.csv\nconcurrency: 4\nquery: nocache=1\noutput:\n  type: jsonl\n  path: out.jsonl\n",
        );
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.input, Path::new("urls.csv"));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.query, "nocache=1");
        assert_eq!(
            config.output,
            OutputConfig::Jsonl {
                path: "out.jsonl".to_string()
            }
        );
    }

    #[test]
    fn loads_toml() {
        let file = config_file(
            ".toml",
            "concurrency = 3\nuser_agent = \"probe/1.0\"\n\n[output]\ntype = \"csv\"\npath = \"out.csv\"\n",
        );
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.user_agent.as_deref(), Some("probe/1.0"));
        assert_eq!(config.output.path(), "out.csv");
    }

    #[test]
    fn rejects_zero_concurrency() {
        let file = config_file(".json", r#"{"concurrency": 0}"#);
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = config_file(".ini", "concurrency=2");
        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
