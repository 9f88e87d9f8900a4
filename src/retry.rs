//! Retry-on-would-block engine.
//!
//! The engine separates two concerns the original blocking wrappers
//! mix together: the per-syscall policy of *which* error codes are
//! recoverable, and the generic drive loop of attempt, classify, park,
//! re-attempt. The loop is unbounded on purpose; termination relies on
//! the wait strategy eventually reporting readiness or a terminal
//! failure (for instance an externally triggered cancellation).

use crate::error::Error;
use crate::event::{Interest, Watcher};
use crate::syscall::platform::errno;
use crate::wait::WaitStrategy;

use libc::{EAGAIN, EALREADY, EINPROGRESS, EWOULDBLOCK};
use std::io;
use std::os::fd::RawFd;

/// Codes a stream operation (read, write, recv, send) may recover from.
pub(crate) const STREAM_RECOVERABLE: &[i32] = &[EWOULDBLOCK, EAGAIN];

/// Codes `connect(2)` may recover from.
///
/// Connection establishment additionally reports "in progress" and
/// "already in progress" while the handshake completes. Stream
/// operations must keep treating those codes as terminal, so the
/// tables stay per-operation instead of being merged.
pub(crate) const CONNECT_RECOVERABLE: &[i32] = &[EWOULDBLOCK, EAGAIN, EINPROGRESS, EALREADY];

/// Classification of one attempt of the underlying operation.
pub(crate) enum Attempt {
    Success(isize),
    Recoverable,
    Terminal(i32),
}

pub(crate) fn classify(retval: isize, err: i32, recoverable: &[i32]) -> Attempt {
    if retval >= 0 {
        Attempt::Success(retval)
    } else if recoverable.contains(&err) {
        Attempt::Recoverable
    } else {
        Attempt::Terminal(err)
    }
}

enum State {
    Attempting,
    Waiting,
    Done(Result<isize, Error>),
}

/// Runs `op` until it succeeds, fails with a non-recoverable code, or
/// the wait strategy reports failure.
///
/// Between attempts the strategy is invoked with a single watcher for
/// `fd` and no timeout. A strategy failure becomes the result
/// immediately; the operation is not re-attempted. The descriptor must
/// already be in non-blocking mode.
pub(crate) fn drive<F>(
    strategy: &dyn WaitStrategy,
    fd: RawFd,
    interest: Interest,
    recoverable: &[i32],
    mut op: F,
) -> Result<isize, Error>
where
    F: FnMut() -> isize,
{
    let mut state = State::Attempting;

    loop {
        state = match state {
            State::Attempting => {
                let retval = op();
                let err = if retval < 0 { errno() } else { 0 };

                match classify(retval, err, recoverable) {
                    Attempt::Success(n) => State::Done(Ok(n)),
                    Attempt::Recoverable => State::Waiting,
                    Attempt::Terminal(code) => {
                        State::Done(Err(io::Error::from_raw_os_error(code).into()))
                    }
                }
            }

            State::Waiting => {
                let watcher = Watcher { fd, interest };
                match strategy.wait(&[watcher], None) {
                    Ok(()) => State::Attempting,
                    Err(failure) => State::Done(Err(failure.into())),
                }
            }

            State::Done(result) => return result,
        };
    }
}
