//! Container entrypoint for a reverse proxy.
//!
//! Renders the proxy's configuration template from environment variables,
//! then runs the proxy and relays its output.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod supervisor;
pub mod template;

pub use config::EntrypointConfig;
pub use error::EntrypointError;
pub use supervisor::{CommandSpec, Supervisor};
pub use template::{Environment, Replacement, VariableSpec};
