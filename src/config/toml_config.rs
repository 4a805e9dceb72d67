use crate::domain::ports::ConfigProvider;
use crate::utils::error::{QueryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROMPT: &str = "Select a test:";
pub const MAX_ROUND_TRIP_LATENCY_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum StoreKind {
    #[default]
    Memory,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub path: Option<String>,
    pub round_trip_latency_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub prompt: Option<String>,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QueryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QueryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` references with environment values; unknown ones stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QueryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.store.kind {
            StoreKind::Memory => {}
            StoreKind::Json | StoreKind::Csv => {
                let path = validation::validate_required_field("store.path", &self.store.path)?;
                validation::validate_path("store.path", path)?;
            }
        }

        if let Some(latency) = self.store.round_trip_latency_ms {
            validation::validate_range(
                "store.round_trip_latency_ms",
                latency,
                0,
                MAX_ROUND_TRIP_LATENCY_MS,
            )?;
        }

        if let Some(prompt) = &self.dispatcher.prompt {
            validation::validate_non_empty_string("dispatcher.prompt", prompt)?;
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format
    }
}

impl ConfigProvider for TomlConfig {
    fn store_kind(&self) -> StoreKind {
        self.store.kind
    }

    fn data_path(&self) -> Option<&str> {
        self.store.path.as_deref()
    }

    fn round_trip_latency_ms(&self) -> u64 {
        self.store.round_trip_latency_ms.unwrap_or(0)
    }

    fn prompt(&self) -> &str {
        self.dispatcher.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[store]
kind = "json"
path = "./data/northwind.json"
round_trip_latency_ms = 5

[logging]
format = "json"
verbose = true

[dispatcher]
prompt = "Pick one:"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.store_kind(), StoreKind::Json);
        assert_eq!(config.data_path(), Some("./data/northwind.json"));
        assert_eq!(config.round_trip_latency_ms(), 5);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.verbose());
        assert_eq!(config.prompt(), "Pick one:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.store_kind(), StoreKind::Memory);
        assert_eq!(config.data_path(), None);
        assert_eq!(config.round_trip_latency_ms(), 0);
        assert_eq!(config.prompt(), DEFAULT_PROMPT);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUERY_TOUR_TEST_DATA_DIR", "/srv/northwind");

        let toml_content = r#"
[store]
kind = "csv"
path = "${QUERY_TOUR_TEST_DATA_DIR}/csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_path(), Some("/srv/northwind/csv"));

        std::env::remove_var("QUERY_TOUR_TEST_DATA_DIR");
    }

    #[test]
    fn test_unknown_env_var_left_verbatim() {
        let toml_content = r#"
[store]
kind = "json"
path = "${QUERY_TOUR_SURELY_UNSET_VARIABLE}/x.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.data_path(),
            Some("${QUERY_TOUR_SURELY_UNSET_VARIABLE}/x.json")
        );
    }

    #[test]
    fn test_file_store_requires_path() {
        let config = TomlConfig::from_toml_str("[store]\nkind = \"json\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(QueryError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_latency_out_of_range() {
        let config =
            TomlConfig::from_toml_str("[store]\nround_trip_latency_ms = 60000\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_validation_error() {
        let result = TomlConfig::from_toml_str("[store\nkind = ");
        assert!(matches!(
            result,
            Err(QueryError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[dispatcher]\nprompt = \"From file:\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.prompt(), "From file:");
    }
}
