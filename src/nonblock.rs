//! Scoped non-blocking toggle for a file descriptor.

use crate::syscall::platform::{sys_get_flags, sys_set_flags};

use libc::O_NONBLOCK;
use std::os::fd::RawFd;

/// Puts a descriptor into non-blocking mode for the guard's lifetime.
///
/// The saved file status flags are restored when the guard drops, so
/// restoration happens exactly once on every exit path. The caller
/// never observes a permanent mode change.
pub(crate) struct NonblockGuard {
    fd: RawFd,
    saved: i32,
}

impl NonblockGuard {
    /// Forces `fd` into non-blocking mode, remembering the flags to
    /// restore.
    ///
    /// Returns `None` when the descriptor is already non-blocking or
    /// its flags cannot be read. In both situations the caller falls
    /// back to a single plain attempt: a descriptor the caller made
    /// non-blocking on purpose may be driven by its own readiness
    /// protocol and must not be silently retried here.
    pub(crate) fn enter(fd: RawFd) -> Option<Self> {
        let flags = sys_get_flags(fd);
        if flags < 0 || flags & O_NONBLOCK != 0 {
            return None;
        }

        sys_set_flags(fd, flags | O_NONBLOCK);
        Some(Self { fd, saved: flags })
    }
}

impl Drop for NonblockGuard {
    fn drop(&mut self) {
        sys_set_flags(self.fd, self.saved);
    }
}
