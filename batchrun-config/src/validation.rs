//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a number that may be zero but not negative
pub fn validate_non_negative<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value < T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be negative, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Validate a bare file name (no directory components)
pub fn validate_file_name(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    validate_required_string(value, field_name, domain)?;

    if value.contains('/') || value.contains('\\') || value.contains('\0') {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be a plain file name, got '{}'", field_name, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0i64, "threads", "execution").is_ok());
        assert!(validate_non_negative(4i64, "threads", "execution").is_ok());

        let err = validate_non_negative(-1i64, "threads", "execution").unwrap_err();
        assert!(err.to_string().contains("threads cannot be negative"));
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("FUN", "name", "experiment").is_ok());
        assert!(validate_file_name("", "name", "experiment").is_err());
        assert!(validate_file_name("a/b", "name", "experiment").is_err());
    }
}
