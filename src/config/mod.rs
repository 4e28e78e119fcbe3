//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EntrypointConfig (validated, immutable)
//!     → CLI flags override individual fields
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the entrypoint runs with no settings file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EntrypointConfig, LogFormat, ObservabilityConfig, TemplateConfig};
pub use validation::{validate_catalog, validate_config, ValidationError};
