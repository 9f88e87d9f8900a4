//! # greenfd
//!
//! **greenfd** is a translation layer that lets code written against
//! blocking file-descriptor primitives (`connect`, `read`, `write`,
//! `send`, `recv`, `poll`) run cooperatively inside an external
//! green-thread or fiber scheduler, without modifying the calling code.
//!
//! A blocking call on a descriptor would stall the whole scheduler
//! thread. greenfd instead flips the descriptor into non-blocking mode
//! for the duration of the call and, whenever the kernel reports a
//! would-block condition, parks the current *logical* thread through a
//! scheduler-supplied [`WaitStrategy`], retrying the real operation
//! once the descriptor is ready. The descriptor's original blocking
//! mode is restored before the call returns, on every path.
//!
//! greenfd is only the translation layer: it does not implement the
//! scheduler, manage multiple descriptors at once, add its own timeout
//! semantics, or buffer I/O data. It only governs *when* the real
//! operation is attempted.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use greenfd::GreenFd;
//! use std::sync::Arc;
//!
//! // The scheduler supplies the suspension point.
//! let io = GreenFd::new(Arc::new(scheduler_wait));
//!
//! // Reads like read(2), but yields instead of blocking.
//! let n = io.read(fd, &mut buffer)?;
//! ```
//!
//! ## Behavior
//!
//! - With no strategy installed ([`GreenFd::passthrough`]) every
//!   operation is a single plain blocking syscall, its result and error
//!   semantics untouched.
//! - Descriptors that are already non-blocking are left alone: the
//!   caller may be running its own readiness protocol, so the operation
//!   is attempted once and returned verbatim.
//! - Genuine errors are never retried and surface with the exact OS
//!   error code the syscall set; only the would-block class (plus
//!   "in progress" for `connect`) triggers a wait-and-retry cycle.
//!
//! ## Feature flags
//!
//! - `poll` *(default)* — the single-descriptor [`GreenFd::poll`] shim
//!   over `poll(2)`.

mod core;
mod nonblock;
#[cfg(feature = "poll")]
mod poll;
mod retry;
mod syscall;

pub mod error;
pub mod event;
pub mod wait;

pub use crate::core::GreenFd;
pub use error::Error;
pub use event::{Interest, Watcher};
pub use wait::{WaitError, WaitStrategy};
