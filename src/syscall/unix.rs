use libc::{
    AF_INET, AF_INET6, F_GETFL, F_SETFL, c_int, connect, fcntl, read, recv, send, sockaddr,
    sockaddr_in, sockaddr_in6, sockaddr_storage, socklen_t, write,
};
use std::io;
use std::mem;
use std::net::SocketAddr;
use std::os::fd::RawFd;

/// Returns the error code left behind by the last failed system call.
pub(crate) fn errno() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Reads the descriptor's file status flags, or a negative value on error.
pub(crate) fn sys_get_flags(fd: RawFd) -> i32 {
    unsafe { fcntl(fd, F_GETFL, 0) }
}

/// Replaces the descriptor's file status flags.
pub(crate) fn sys_set_flags(fd: RawFd, flags: i32) -> i32 {
    unsafe { fcntl(fd, F_SETFL, flags) }
}

/// Initiates a connection. Returns 0 on success, a negative value on error.
pub(crate) fn sys_connect(fd: RawFd, addr: &sockaddr_storage, len: socklen_t) -> isize {
    unsafe { connect(fd, addr as *const _ as *const sockaddr, len) as isize }
}

/// Reads from a file descriptor into the given buffer.
///
/// Returns the number of bytes read, or a negative value on error.
pub(crate) fn sys_read(fd: RawFd, buffer: &mut [u8]) -> isize {
    unsafe { read(fd, buffer.as_mut_ptr() as *mut _, buffer.len()) }
}

/// Writes the buffer to a file descriptor.
///
/// Returns the number of bytes written, or a negative value on error.
pub(crate) fn sys_write(fd: RawFd, buffer: &[u8]) -> isize {
    unsafe { write(fd, buffer.as_ptr() as *const _, buffer.len()) }
}

/// Receives from a socket with `recv(2)` flags.
pub(crate) fn sys_recv(fd: RawFd, buffer: &mut [u8], flags: c_int) -> isize {
    unsafe { recv(fd, buffer.as_mut_ptr() as *mut _, buffer.len(), flags) }
}

/// Sends on a socket with `send(2)` flags.
pub(crate) fn sys_send(fd: RawFd, buffer: &[u8], flags: c_int) -> isize {
    unsafe { send(fd, buffer.as_ptr() as *const _, buffer.len(), flags) }
}

/// Multiplexes readiness with `poll(2)`.
///
/// Returns the number of ready descriptors, or a negative value on error.
#[cfg(feature = "poll")]
pub(crate) fn sys_poll(fds: &mut [libc::pollfd], timeout_ms: c_int) -> c_int {
    unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout_ms) }
}

/// Converts a `SocketAddr` into a `sockaddr_storage` suitable for `connect(2)`.
pub(crate) fn socketaddr_to_storage(addr: &SocketAddr) -> (sockaddr_storage, socklen_t) {
    let mut storage: sockaddr_storage = unsafe { mem::zeroed() };

    match addr {
        SocketAddr::V4(v4) => {
            let sa = unsafe { &mut *(&mut storage as *mut _ as *mut sockaddr_in) };
            sa.sin_family = AF_INET as _;
            sa.sin_port = v4.port().to_be();
            sa.sin_addr.s_addr = u32::from(*v4.ip()).to_be();

            (storage, mem::size_of::<sockaddr_in>() as socklen_t)
        }

        SocketAddr::V6(v6) => {
            let sa = unsafe { &mut *(&mut storage as *mut _ as *mut sockaddr_in6) };
            sa.sin6_family = AF_INET6 as _;
            sa.sin6_port = v6.port().to_be();
            sa.sin6_addr.s6_addr = v6.ip().octets();
            sa.sin6_flowinfo = v6.flowinfo();
            sa.sin6_scope_id = v6.scope_id();

            (storage, mem::size_of::<sockaddr_in6>() as socklen_t)
        }
    }
}
