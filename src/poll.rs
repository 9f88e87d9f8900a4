//! Single-descriptor readiness-multiplexing shim.
//!
//! Adapts a `poll(2)`-shaped call to the wait strategy: wait first
//! through the strategy, then run the real syscall with a zero timeout
//! to collect the readiness bits. Shapes the shim cannot express (more
//! than one descriptor, event bits beyond `POLLIN|POLLPRI|POLLOUT`)
//! fall back to the plain blocking call with a diagnostic on stderr;
//! correctness is preserved, only the cooperative yielding is lost.

use crate::core::GreenFd;
use crate::error::Error;
use crate::event::{Interest, Watcher};
use crate::syscall::platform::sys_poll;

use libc::{POLLIN, POLLOUT, POLLPRI, c_short, pollfd};
use std::io;
use std::time::Duration;

const SUPPORTED: c_short = POLLIN | POLLPRI | POLLOUT;

impl GreenFd {
    /// Polls like `poll(2)`, yielding instead of blocking.
    ///
    /// Exactly one descriptor with an event mask drawn from
    /// `POLLIN|POLLPRI|POLLOUT` is waited for cooperatively; the
    /// caller's timeout is forwarded to the strategy verbatim. Any
    /// other shape runs the plain blocking `poll(2)` unmodified.
    ///
    /// Returns the number of ready descriptors, with `revents` filled
    /// in as usual.
    pub fn poll(&self, fds: &mut [pollfd], timeout: Option<Duration>) -> Result<usize, Error> {
        let Some(strategy) = self.strategy() else {
            return check(sys_poll(fds, timeout_ms(timeout)));
        };

        if fds.len() != 1 {
            eprintln!(
                "[greenfd] poll supports a single descriptor only, got {}; falling back to a blocking call",
                fds.len()
            );
            return check(sys_poll(fds, timeout_ms(timeout)));
        }

        let request = fds[0];

        if request.events & !SUPPORTED != 0 {
            eprintln!(
                "[greenfd] poll supports POLLIN|POLLPRI|POLLOUT only, got {:#x}; falling back to a blocking call",
                request.events
            );
            return check(sys_poll(fds, timeout_ms(timeout)));
        }

        let interest = Interest {
            read: request.events & (POLLIN | POLLPRI) != 0,
            write: request.events & POLLOUT != 0,
        };

        let watcher = Watcher {
            fd: request.fd,
            interest,
        };

        // The strategy already waited (or timed out, or failed); the
        // real call below collects the final readiness bits without
        // blocking.
        let _ = strategy.wait(&[watcher], timeout);

        check(sys_poll(fds, 0))
    }
}

fn timeout_ms(timeout: Option<Duration>) -> i32 {
    timeout.map(|t| t.as_millis() as i32).unwrap_or(-1)
}

fn check(retval: i32) -> Result<usize, Error> {
    if retval < 0 {
        Err(io::Error::last_os_error().into())
    } else {
        Ok(retval as usize)
    }
}
