//! Template rendering subsystem.
//!
//! # Data Flow
//! ```text
//! variables.rs (fixed catalog)
//!     → resolver.rs (environment snapshot → ordered replacements)
//!         → transform.rs (per-variable value rewrites)
//!     → store.rs (read template bytes)
//!     → substitution.rs (literal placeholder rewrite)
//!     → store.rs (write template bytes back)
//! ```
//!
//! # Design Decisions
//! - The template format is never parsed; substitution is purely textual
//! - Resolution is fail-fast: the first missing required variable aborts
//! - Every pass is a pure transformation over a fresh snapshot

pub mod resolver;
pub mod store;
pub mod substitution;
pub mod transform;
pub mod variables;

pub use resolver::{resolve, DefaultPolicy, Environment, Replacement, ResolveError, Resolver};
pub use store::{FileStore, StoreError, TemplateStore};
pub use substitution::{missing_placeholders, substitute, Substitution, SubstitutionError};
pub use variables::{list_variables, Transform, VariableSpec};
