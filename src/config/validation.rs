//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, port valid)
//! - Reject blank host entries and an empty store key
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use crate::config::schema::SelectorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("management.scheme must be 'http' or 'https', got '{0}'")]
    InvalidScheme(String),

    #[error("management.port must be non-zero")]
    ZeroPort,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("store.key must not be empty")]
    EmptyStoreKey,

    #[error("store.path must not be empty")]
    EmptyStorePath,

    #[error("hosts[{0}] is blank")]
    BlankHost(usize),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &SelectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let scheme = config.management.scheme.as_str();
    if scheme != "http" && scheme != "https" {
        errors.push(ValidationError::InvalidScheme(scheme.to_string()));
    }
    if config.management.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.timeouts.connect_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_ms"));
    }
    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("request_ms"));
    }
    if config.store.key.trim().is_empty() {
        errors.push(ValidationError::EmptyStoreKey);
    }
    if config.store.path.trim().is_empty() {
        errors.push(ValidationError::EmptyStorePath);
    }
    for (i, host) in config.hosts.iter().enumerate() {
        if host.trim().is_empty() {
            errors.push(ValidationError::BlankHost(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SelectorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SelectorConfig::default();
        config.management.scheme = "amqp".into();
        config.management.port = 0;
        config.timeouts.request_ms = 0;
        config.store.key = " ".into();
        config.hosts = vec!["mq-1".into(), "".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidScheme("amqp".into()),
                ValidationError::ZeroPort,
                ValidationError::ZeroTimeout("request_ms"),
                ValidationError::EmptyStoreKey,
                ValidationError::BlankHost(1),
            ]
        );
    }
}
