//! The wait strategy: this crate's single pluggable collaborator.
//!
//! The embedding scheduler owns the suspension mechanism. Whatever it
//! is built on (an event loop around `epoll`/`kqueue`, a fiber park
//! list, a plain `poll(2)` call), this layer only relies on the call
//! returning once the watched descriptor is ready, a timeout elapsed,
//! or the wait was cancelled.

use crate::event::Watcher;

use std::time::Duration;
use thiserror::Error;

/// Failure or cancellation reported by a [`WaitStrategy`].
///
/// Carries the strategy's negative return code verbatim. This layer
/// never interprets or translates the code; it becomes the wrapped
/// call's result as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wait strategy reported failure ({0})")]
pub struct WaitError(pub i32);

/// Suspends the calling logical thread until a descriptor is ready.
///
/// `wait` blocks the *logical* thread, not the OS thread: a green-thread
/// scheduler is expected to park the current fiber and run others until
/// one of the watchers' readiness conditions holds.
///
/// `timeout` of `None` means wait indefinitely. The retry engine always
/// passes `None`; only the poll shim forwards a caller-supplied timeout.
///
/// Returns `Ok(())` once readiness was achieved for at least one
/// watcher (or the timeout elapsed), and `Err` with the scheduler's
/// failure or cancellation code otherwise.
pub trait WaitStrategy: Send + Sync {
    fn wait(&self, watchers: &[Watcher], timeout: Option<Duration>) -> Result<(), WaitError>;
}

impl<F> WaitStrategy for F
where
    F: Fn(&[Watcher], Option<Duration>) -> Result<(), WaitError> + Send + Sync,
{
    fn wait(&self, watchers: &[Watcher], timeout: Option<Duration>) -> Result<(), WaitError> {
        self(watchers, timeout)
    }
}
