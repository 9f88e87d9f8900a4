//! Error type for wrapped operations.

use crate::wait::WaitError;

use std::io;
use thiserror::Error;

/// An error returned by a wrapped operation.
///
/// The two variants keep the underlying syscall's error channel and the
/// wait strategy's failure channel apart: an `Io` error is exactly what
/// the plain blocking call would have produced, while a `Wait` error
/// means the scheduler's suspension primitive itself failed or was
/// cancelled and the operation's outcome is unknown.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying syscall failed with a genuine (non-would-block)
    /// error. The original OS error code is preserved unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The wait strategy reported failure or cancellation while the
    /// caller was parked.
    #[error(transparent)]
    Wait(#[from] WaitError),
}

impl Error {
    /// The raw OS error code, exactly as the syscall set it.
    ///
    /// `None` for wait-strategy failures, which carry no errno.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Io(err) => err.raw_os_error(),
            Error::Wait(_) => None,
        }
    }

    /// The wait strategy's failure code, if that is what ended the call.
    pub fn wait_code(&self) -> Option<i32> {
        match self {
            Error::Io(_) => None,
            Error::Wait(WaitError(code)) => Some(*code),
        }
    }
}
