use crate::utils::error::{QueryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| QueryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(QueryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.path", "./data/northwind.json").is_ok());
        assert!(validate_path("store.path", "").is_err());
        assert!(validate_path("store.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("data".to_string());
        let missing: Option<String> = None;

        assert_eq!(validate_required_field("store.path", &present).unwrap(), "data");
        assert!(matches!(
            validate_required_field("store.path", &missing),
            Err(QueryError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("dispatcher.prompt", "Select a test:").is_ok());
        assert!(validate_non_empty_string("dispatcher.prompt", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("store.round_trip_latency_ms", 5u64, 0, 10_000).is_ok());
        assert!(validate_range("store.round_trip_latency_ms", 20_000u64, 0, 10_000).is_err());
    }
}
