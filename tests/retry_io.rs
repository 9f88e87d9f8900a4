use greenfd::{GreenFd, WaitError, WaitStrategy, Watcher};

use std::os::fd::RawFd;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn pipe() -> (RawFd, RawFd) {
    let mut fds = [0; 2];
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    assert_eq!(rc, 0, "pipe creation failed");
    (fds[0], fds[1])
}

fn close(fd: RawFd) {
    unsafe { libc::close(fd) };
}

fn is_nonblocking(fd: RawFd) -> bool {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL, 0) };
    flags & libc::O_NONBLOCK != 0
}

#[test]
fn read_recovers_after_would_block() {
    let (rx, tx) = pipe();
    let waits = Arc::new(AtomicUsize::new(0));

    // Readiness arrives as soon as the caller parks: the strategy
    // plays the role of another logical thread producing data.
    let strategy: Arc<dyn WaitStrategy> = {
        let waits = waits.clone();
        Arc::new(
            move |watchers: &[Watcher], timeout: Option<Duration>| -> Result<(), WaitError> {
                assert_eq!(watchers.len(), 1, "one watcher per wait");
                assert!(watchers[0].interest.read, "a read waits for readability");
                assert!(timeout.is_none(), "retry waits must be unbounded");

                waits.fetch_add(1, Ordering::SeqCst);
                let n = unsafe { libc::write(tx, b"ready".as_ptr() as *const _, 5) };
                assert_eq!(n, 5);
                Ok(())
            },
        )
    };
    let io = GreenFd::new(strategy);

    let mut buffer = [0u8; 16];
    let n = io.read(rx, &mut buffer).expect("read failed");
    assert_eq!(n, 5);
    assert_eq!(&buffer[..n], b"ready");

    assert_eq!(waits.load(Ordering::SeqCst), 1, "exactly one parked wait");
    assert!(!is_nonblocking(rx), "blocking mode must be restored");

    close(rx);
    close(tx);
}

#[test]
fn write_recovers_once_the_pipe_drains() {
    let (rx, tx) = pipe();

    // Fill the pipe so the first cooperative attempt would block.
    let flags = unsafe { libc::fcntl(tx, libc::F_GETFL, 0) };
    unsafe { libc::fcntl(tx, libc::F_SETFL, flags | libc::O_NONBLOCK) };
    let chunk = [0u8; 4096];
    loop {
        let n = unsafe { libc::write(tx, chunk.as_ptr() as *const _, chunk.len()) };
        if n < 0 {
            break;
        }
    }
    unsafe { libc::fcntl(tx, libc::F_SETFL, flags & !libc::O_NONBLOCK) };

    let waits = Arc::new(AtomicUsize::new(0));
    let strategy: Arc<dyn WaitStrategy> = {
        let waits = waits.clone();
        Arc::new(
            move |watchers: &[Watcher], _: Option<Duration>| -> Result<(), WaitError> {
                assert!(watchers[0].interest.write, "a write waits for writability");
                waits.fetch_add(1, Ordering::SeqCst);

                // Drain the other end to make room.
                let mut sink = vec![0u8; 1 << 16];
                let n = unsafe { libc::read(rx, sink.as_mut_ptr() as *mut _, sink.len()) };
                assert!(n > 0, "the full pipe must be readable");
                Ok(())
            },
        )
    };
    let io = GreenFd::new(strategy);

    let n = io.write(tx, b"after the drain").expect("write failed");
    assert!(n > 0);

    assert!(waits.load(Ordering::SeqCst) >= 1, "at least one parked wait");
    assert!(!is_nonblocking(tx), "blocking mode must be restored");

    close(rx);
    close(tx);
}

#[test]
fn strategy_failure_becomes_the_calls_result() {
    let (rx, tx) = pipe();

    let strategy: Arc<dyn WaitStrategy> = Arc::new(
        |_: &[Watcher], _: Option<Duration>| -> Result<(), WaitError> { Err(WaitError(-42)) },
    );
    let io = GreenFd::new(strategy);

    let mut buffer = [0u8; 8];
    let err = io
        .read(rx, &mut buffer)
        .expect_err("a failing strategy must end the call");

    assert_eq!(err.wait_code(), Some(-42), "the code must surface verbatim");
    assert_eq!(err.raw_os_error(), None, "no errno on the wait channel");

    close(rx);
    close(tx);
}
