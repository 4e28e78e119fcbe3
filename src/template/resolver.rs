//! Environment resolution.
//!
//! # Responsibilities
//! - Look up every catalog variable in an environment snapshot
//! - Enforce required/optional policy (fail fast on the first missing required variable)
//! - Apply each variable's transform before emitting a replacement
//!
//! # Design Decisions
//! - The environment is an explicit, immutable snapshot, never read ambiently
//! - Empty values count as absent
//! - Whether optional defaults reach the template is a [`DefaultPolicy`] choice

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::variables::{list_variables, VariableSpec};

/// Errors produced while resolving the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("missing required env var: {name}. Description: {description}")]
    MissingRequiredVariable {
        name: &'static str,
        description: &'static str,
    },
}

/// What to do with an optional variable that is not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DefaultPolicy {
    /// Emit nothing; the placeholder stays in the template.
    #[default]
    Inert,
    /// Emit the (transformed) default when it is non-empty.
    Apply,
}

/// One resolved placeholder and the value that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub key: String,
    pub value: String,
}

impl Replacement {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Value for `name`, treating an empty string as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolves a variable catalog against an [`Environment`].
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    catalog: &'a [VariableSpec],
    policy: DefaultPolicy,
}

impl Resolver<'static> {
    /// Resolver over the built-in catalog.
    pub fn new(policy: DefaultPolicy) -> Self {
        Self {
            catalog: list_variables(),
            policy,
        }
    }
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(DefaultPolicy::default())
    }
}

impl<'a> Resolver<'a> {
    /// Resolver over a caller-supplied catalog.
    pub fn with_catalog(catalog: &'a [VariableSpec], policy: DefaultPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Walk the catalog in order and build the replacement list.
    pub fn resolve(&self, env: &Environment) -> Result<Vec<Replacement>, ResolveError> {
        let mut replacements = Vec::with_capacity(self.catalog.len());

        for var in self.catalog {
            let raw = match env.get(var.name) {
                Some(value) => value,
                None if var.required => {
                    return Err(ResolveError::MissingRequiredVariable {
                        name: var.name,
                        description: var.description,
                    });
                }
                None => match self.policy {
                    DefaultPolicy::Apply if !var.default_value.is_empty() => {
                        tracing::debug!(
                            name = var.name,
                            default = var.default_value,
                            "Applying default for unset optional variable"
                        );
                        var.default_value
                    }
                    _ => {
                        tracing::debug!(name = var.name, "Optional variable not set, skipping");
                        continue;
                    }
                },
            };

            replacements.push(Replacement::new(var.name, var.transform.apply(raw)));
        }

        Ok(replacements)
    }
}

/// Resolve the built-in catalog with inert defaults.
pub fn resolve(env: &Environment) -> Result<Vec<Replacement>, ResolveError> {
    Resolver::default().resolve(env)
}
