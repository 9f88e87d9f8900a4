//! Platform syscall layer.
//!
//! Thin raw wrappers over the blocking primitives this crate governs.
//! The wrappers return the syscall's value untranslated; interpreting
//! the result (and the `errno` it left behind) is the caller's job,
//! since the retry engine needs to see would-block codes before they
//! are converted into `io::Error`.
//!
//! The concrete implementation is selected at compile time depending
//! on the target operating system.

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) use unix as platform;
