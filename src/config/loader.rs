//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EntrypointConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EntrypointConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EntrypointConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DefaultPolicy;

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entrypoint.toml");
        fs::write(
            &path,
            "[template]\npath = \"/srv/traefik.toml\"\ndefaults = \"apply\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.template.path, Path::new("/srv/traefik.toml"));
        assert_eq!(config.template.defaults, DefaultPolicy::Apply);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entrypoint.toml");
        fs::write(&path, "[template\n").unwrap();
        assert!(matches!(load_config(&path).unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entrypoint.toml");
        fs::write(&path, "[template]\npath = \"\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(
            err.to_string(),
            "Validation failed: template.path must not be empty"
        );
    }
}
