use crate::error::Error;
use crate::event::Interest;
use crate::nonblock::NonblockGuard;
use crate::retry::{self, drive};
use crate::syscall::platform::{
    socketaddr_to_storage, sys_connect, sys_read, sys_recv, sys_send, sys_write,
};
use crate::wait::WaitStrategy;

use libc::c_int;
use std::io;
use std::net::SocketAddr;
use std::os::fd::RawFd;
use std::sync::Arc;

/// The cooperative I/O context.
///
/// `GreenFd` wraps the blocking primitives (`connect`, `read`, `write`,
/// `recv`, `send` and, with the `poll` feature, a single-descriptor
/// `poll`) so that a would-block condition suspends the calling logical
/// thread through the scheduler's [`WaitStrategy`] instead of stalling
/// the OS thread.
///
/// Every operation follows the same shape:
///
/// 1. With no strategy installed, or when the descriptor cannot be
///    toggled into non-blocking mode (including descriptors the caller
///    already made non-blocking), the plain syscall runs once and its
///    result is returned verbatim.
/// 2. Otherwise the descriptor is forced non-blocking, the operation is
///    retried across strategy waits until it completes or fails with a
///    genuine error, and the original blocking mode is restored before
///    the call returns, on every path.
///
/// The `O_NONBLOCK` flag is shared process-wide per descriptor and is
/// not locked during the toggle-call-restore window; do not run two
/// wrapped operations on the same descriptor from different execution
/// contexts at once.
pub struct GreenFd {
    strategy: Option<Arc<dyn WaitStrategy>>,
}

impl GreenFd {
    /// Creates a context that suspends through `strategy`.
    ///
    /// The scheduler embedding this layer owns the strategy and hands
    /// it in here; several contexts with different strategies can
    /// coexist in one process.
    pub fn new(strategy: Arc<dyn WaitStrategy>) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Creates a context with no wait strategy.
    ///
    /// Every operation degrades to the plain blocking syscall, with its
    /// result and error semantics untouched.
    pub fn passthrough() -> Self {
        Self { strategy: None }
    }

    #[cfg(feature = "poll")]
    pub(crate) fn strategy(&self) -> Option<&dyn WaitStrategy> {
        self.strategy.as_deref()
    }

    /// The cooperative entry check shared by all wrapped operations:
    /// a strategy must be installed and the descriptor must have been
    /// blocking (the guard restores its mode on drop).
    fn cooperative(&self, fd: RawFd) -> Option<(&dyn WaitStrategy, NonblockGuard)> {
        let strategy = self.strategy.as_deref()?;
        let guard = NonblockGuard::enter(fd)?;
        Some((strategy, guard))
    }

    /// Connects a socket like `connect(2)`, yielding instead of blocking.
    ///
    /// While the handshake is in progress the kernel reports
    /// "in progress" / "already in progress"; both are treated as
    /// would-block conditions and retried after readiness.
    pub fn connect(&self, fd: RawFd, address: &SocketAddr) -> Result<(), Error> {
        let (storage, len) = socketaddr_to_storage(address);
        let connect_once = || sys_connect(fd, &storage, len);

        match self.cooperative(fd) {
            Some((strategy, _guard)) => {
                drive(strategy, fd, Interest::READ, retry::CONNECT_RECOVERABLE, connect_once)?;
            }
            None => {
                check(connect_once())?;
            }
        }

        Ok(())
    }

    /// Reads like `read(2)`, yielding instead of blocking.
    pub fn read(&self, fd: RawFd, buffer: &mut [u8]) -> Result<usize, Error> {
        let mut read_once = || sys_read(fd, buffer);

        let retval = match self.cooperative(fd) {
            Some((strategy, _guard)) => {
                drive(strategy, fd, Interest::READ, retry::STREAM_RECOVERABLE, read_once)?
            }
            None => check(read_once())?,
        };

        Ok(retval as usize)
    }

    /// Writes like `write(2)`, yielding instead of blocking.
    pub fn write(&self, fd: RawFd, buffer: &[u8]) -> Result<usize, Error> {
        let write_once = || sys_write(fd, buffer);

        let retval = match self.cooperative(fd) {
            Some((strategy, _guard)) => {
                drive(strategy, fd, Interest::WRITE, retry::STREAM_RECOVERABLE, write_once)?
            }
            None => check(write_once())?,
        };

        Ok(retval as usize)
    }

    /// Receives like `recv(2)`, yielding instead of blocking.
    pub fn recv(&self, fd: RawFd, buffer: &mut [u8], flags: c_int) -> Result<usize, Error> {
        let mut recv_once = || sys_recv(fd, buffer, flags);

        let retval = match self.cooperative(fd) {
            Some((strategy, _guard)) => {
                drive(strategy, fd, Interest::READ, retry::STREAM_RECOVERABLE, recv_once)?
            }
            None => check(recv_once())?,
        };

        Ok(retval as usize)
    }

    /// Sends like `send(2)`, yielding instead of blocking.
    pub fn send(&self, fd: RawFd, buffer: &[u8], flags: c_int) -> Result<usize, Error> {
        let send_once = || sys_send(fd, buffer, flags);

        let retval = match self.cooperative(fd) {
            Some((strategy, _guard)) => {
                drive(strategy, fd, Interest::WRITE, retry::STREAM_RECOVERABLE, send_once)?
            }
            None => check(send_once())?,
        };

        Ok(retval as usize)
    }
}

/// Converts a raw syscall return into a result, preserving the errno
/// the call set.
fn check(retval: isize) -> Result<isize, Error> {
    if retval < 0 {
        Err(io::Error::last_os_error().into())
    } else {
        Ok(retval)
    }
}
