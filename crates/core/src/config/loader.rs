use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
/// (`BOOKSHELF_GUTENDEX__TIMEOUT_SECS` style, double underscore between
/// sections).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("BOOKSHELF_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[database]
path = "books.db"

[gutendex]
timeout_secs = 10
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.database.path, PathBuf::from("books.db"));
        assert_eq!(config.gutendex.timeout_secs, 10);
        // Unset fields fall back to defaults.
        assert_eq!(config.gutendex.base_url, "https://gutendex.com/books");
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.database.path, PathBuf::from("bookshelf.db"));
        assert_eq!(config.gutendex.timeout_secs, 30);
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("[gutendex]\ntimeout_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[database]
path = "/tmp/shelf.db"

[gutendex]
base_url = "http://localhost:8000/books"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/shelf.db"));
        assert_eq!(config.gutendex.base_url, "http://localhost:8000/books");
    }
}
