//! Process supervision subsystem.
//!
//! # Data Flow
//! ```text
//! CommandSpec (program + args)
//!     → process.rs (spawn child, stdout piped, stderr inherited)
//!         → relay.rs (background task: child stdout → sink, one line at a time)
//!     → process.rs (block on child exit, join relay, map status)
//! ```
//!
//! # Design Decisions
//! - Exactly one background task; the pipe is read by nobody else
//! - No timeout on the child, no restart, no signal forwarding
//! - The relay is joined after exit so no line written before exit is lost
//! - The join is bounded by a drain grace; a grandchild holding the pipe open
//!   cannot keep the entrypoint alive after the child is gone
//! - Lines longer than `relay::MAX_CHUNK_BYTES` are streamed in chunks
//! - A non-zero exit is an error whose exit code mirrors the child's

pub mod command;
pub mod process;
pub mod relay;

pub use command::CommandSpec;
pub use process::{ExitOutcome, Supervisor, SupervisorError, DEFAULT_DRAIN_GRACE};
