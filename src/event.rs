use std::os::fd::RawFd;

/// Readiness interest for a watcher.
///
/// Describes which condition the wait strategy should park the caller
/// for. Each wrapped operation derives its interest from the syscall it
/// wraps: `connect`, `read` and `recv` wait for readability, `write`
/// and `send` for writability. The poll shim derives it from the
/// caller's event mask instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interest {
    pub read: bool,
    pub write: bool,
}

impl Interest {
    /// Interest in the descriptor becoming readable.
    pub const READ: Interest = Interest {
        read: true,
        write: false,
    };

    /// Interest in the descriptor becoming writable.
    pub const WRITE: Interest = Interest {
        read: false,
        write: true,
    };
}

/// A single (descriptor, interest) pair submitted to the wait strategy.
///
/// The present design submits exactly one watcher per wrapped call;
/// fan-out over multiple descriptors is the scheduler's business, not
/// this layer's.
#[derive(Clone, Copy, Debug)]
pub struct Watcher {
    pub fd: RawFd,
    pub interest: Interest,
}
