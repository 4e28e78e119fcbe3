//! Configuration schema definitions.
//!
//! Settings for the entrypoint itself (not the proxy's template). All types
//! derive Serde traits and every field has a default, so an empty settings
//! file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::template::DefaultPolicy;

/// Well-known location of the proxy configuration template.
pub const DEFAULT_TEMPLATE_PATH: &str = "/etc/traefik/traefik.toml";

/// Root configuration for the entrypoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EntrypointConfig {
    /// Template location and rendering behavior.
    pub template: TemplateConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Template rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template file, rewritten in place.
    pub path: PathBuf,

    /// Treatment of unset optional variables.
    pub defaults: DefaultPolicy,

    /// Log a warning for catalog variables with no placeholder in the template.
    pub warn_missing_placeholders: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            defaults: DefaultPolicy::default(),
            warn_missing_placeholders: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub log_filter: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "proxy_entrypoint=info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}
