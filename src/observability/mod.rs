//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! Consumers:
//!     → Container runtime log driver
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - stdout is reserved for the supervised process

pub mod logging;
