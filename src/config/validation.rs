//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the variable catalog invariants (unique, non-empty names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EntrypointConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::EntrypointConfig;
use crate::template::VariableSpec;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("template.path must not be empty")]
    EmptyTemplatePath,

    #[error("observability.log_filter {filter:?} is invalid: {reason}")]
    InvalidLogFilter { filter: String, reason: String },

    #[error("variable name must not be empty")]
    EmptyVariableName,

    #[error("variable {0} is declared more than once")]
    DuplicateVariable(&'static str),
}

/// Validate entrypoint settings.
pub fn validate_config(config: &EntrypointConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.template.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyTemplatePath);
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_filter) {
        errors.push(ValidationError::InvalidLogFilter {
            filter: config.observability.log_filter.clone(),
            reason: e.to_string(),
        });
    }

    into_result(errors)
}

/// Validate a variable catalog.
pub fn validate_catalog(catalog: &[VariableSpec]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for var in catalog {
        if var.name.is_empty() {
            errors.push(ValidationError::EmptyVariableName);
        } else if !seen.insert(var.name) {
            errors.push(ValidationError::DuplicateVariable(var.name));
        }
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{list_variables, Transform};
    use std::path::PathBuf;

    fn var(name: &'static str) -> VariableSpec {
        VariableSpec {
            name,
            required: false,
            description: "",
            default_value: "",
            transform: Transform::Verbatim,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&EntrypointConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = EntrypointConfig::default();
        config.template.path = PathBuf::new();
        config.observability.log_filter = "proxy_entrypoint=loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ValidationError::EmptyTemplatePath);
        assert!(matches!(errors[1], ValidationError::InvalidLogFilter { .. }));
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        assert!(validate_catalog(list_variables()).is_ok());
    }

    #[test]
    fn test_catalog_duplicates_and_empty_names() {
        let catalog = [var("TLD"), var(""), var("SANS"), var("TLD")];
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyVariableName,
                ValidationError::DuplicateVariable("TLD"),
            ]
        );
    }
}
