mod loader;
mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Check invariants the type system cannot express.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.gutendex.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "gutendex.base_url must not be empty".to_string(),
        ));
    }
    if !config.gutendex.base_url.starts_with("http") {
        return Err(ConfigError::ValidationError(format!(
            "gutendex.base_url must be an http(s) URL, got '{}'",
            config.gutendex.base_url
        )));
    }
    if config.gutendex.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "gutendex.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.database.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "database.path must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.gutendex.timeout_secs = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.gutendex.base_url = "ftp://gutendex.com/books".to_string();

        assert!(validate_config(&config).is_err());
    }
}
