//! Trailing-edge debouncing
//!
//! This crate provides:
//! - `Debounced`, a wrapper that coalesces rapid calls into one delayed call
//!   carrying the most recent arguments
//! - Pluggable timer services (tokio-backed and a manual virtual clock)
//! - Validated millisecond delays

pub mod debouncer;
pub mod delay;
pub mod error;
pub mod timer;

// Re-exports
pub use debouncer::{debounce, DebounceState, Debounced};
pub use delay::Delay;
pub use error::{DebounceError, Result};
pub use timer::{ManualHandle, ManualTimer, Task, TimerService, TokioTimer};
