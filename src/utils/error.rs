use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input '{input}': {reason}")]
    InputParse { input: String, reason: String },

    #[error("No element matched: {what}")]
    NoMatch { what: String },

    #[error("Expected exactly one {what}, found {count}")]
    MultipleMatches { what: String, count: usize },

    #[error("Data source '{source_name}' unavailable: {reason}")]
    DataSourceUnavailable { source_name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Query,
    DataSource,
    Config,
    System,
}

impl QueryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QueryError::InputParse { .. } => ErrorCategory::Input,
            QueryError::NoMatch { .. } | QueryError::MultipleMatches { .. } => {
                ErrorCategory::Query
            }
            QueryError::DataSourceUnavailable { .. }
            | QueryError::CsvError(_)
            | QueryError::SerializationError(_) => ErrorCategory::DataSource,
            QueryError::ConfigError { .. }
            | QueryError::ConfigValidationError { .. }
            | QueryError::InvalidConfigValueError { .. }
            | QueryError::MissingConfigError { .. } => ErrorCategory::Config,
            QueryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter a plain number, for example 20 or 19.5",
            ErrorCategory::Query => "The query expects a different number of matches in the data set",
            ErrorCategory::DataSource => "Check that the data path exists and holds a valid snapshot",
            ErrorCategory::Config => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and the terminal",
        }
    }

    pub(crate) fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::DataSourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_errors_are_query_category() {
        let none = QueryError::NoMatch {
            what: "category named 'Nuts'".to_string(),
        };
        let many = QueryError::MultipleMatches {
            what: "category".to_string(),
            count: 5,
        };

        assert_eq!(none.category(), ErrorCategory::Query);
        assert_eq!(many.category(), ErrorCategory::Query);
        assert_eq!(many.to_string(), "Expected exactly one category, found 5");
    }

    #[test]
    fn test_unavailable_message() {
        let err = QueryError::unavailable("json:/tmp/missing.json", "file not found");
        assert_eq!(err.category(), ErrorCategory::DataSource);
        assert!(err.to_string().contains("json:/tmp/missing.json"));
    }
}
