//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Check template exists → Resolve env → Read → Substitute → Write → Supervise
//! ```
//!
//! # Design Decisions
//! - Runs exactly once per process lifetime
//! - The process exit mirrors the supervised command's exit
//! - Restarts are the container runtime's job

pub mod startup;

pub use startup::{render, run, run_with};
