//! Resize and interrupt notification.
//!
//! Handlers flip atomic flags and write one byte into a self-pipe. The input
//! loop polls the terminal together with the pipe's read end, so a signal that
//! lands between the flag check and the wait still wakes it.

use std::io;
use std::mem::MaybeUninit;
use std::os::fd::RawFd;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
/// Write end of the wake pipe, `-1` while no guard is installed.
static WAKE_WRITE_FD: AtomicI32 = AtomicI32::new(-1);

const WATCHED_SIGNALS: [libc::c_int; 3] = [libc::SIGWINCH, libc::SIGINT, libc::SIGTERM];

extern "C" fn handle_signal(signum: libc::c_int) {
    if signum == libc::SIGWINCH {
        RESIZE_PENDING.store(true, Ordering::SeqCst);
    } else {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }
    let fd = WAKE_WRITE_FD.load(Ordering::SeqCst);
    if fd >= 0 {
        let byte = 1u8;
        // SAFETY: write(2) is async-signal-safe; a full pipe (EAGAIN) already means a wakeup is pending.
        unsafe {
            libc::write(fd, (&byte as *const u8).cast(), 1);
        }
    }
}

/// Installed handlers; the previous dispositions come back on drop.
pub struct SignalGuard {
    previous: Vec<(libc::c_int, libc::sigaction)>,
    wake_read: RawFd,
    wake_write: RawFd,
}

impl SignalGuard {
    pub fn install() -> io::Result<Self> {
        RESIZE_PENDING.store(false, Ordering::SeqCst);
        INTERRUPTED.store(false, Ordering::SeqCst);
        let (wake_read, wake_write) = wake_pipe()?;
        let mut guard = Self {
            previous: Vec::with_capacity(WATCHED_SIGNALS.len()),
            wake_read,
            wake_write,
        };
        WAKE_WRITE_FD.store(wake_write, Ordering::SeqCst);
        for signum in WATCHED_SIGNALS {
            let previous = install_handler(signum)?;
            guard.previous.push((signum, previous));
        }
        Ok(guard)
    }

    /// Becomes readable whenever a watched signal arrives.
    pub fn wake_fd(&self) -> RawFd {
        self.wake_read
    }

    /// Empty the wake pipe once the flags have been looked at.
    pub fn drain_wakeups(&self) {
        let mut buf = [0u8; 64];
        loop {
            // SAFETY: the read end is non-blocking and owned by this guard.
            let n = unsafe { libc::read(self.wake_read, buf.as_mut_ptr().cast(), buf.len()) };
            if n <= 0 {
                break;
            }
        }
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for (signum, previous) in self.previous.drain(..) {
            // SAFETY: restoring a disposition previously returned by sigaction.
            unsafe {
                libc::sigaction(signum, &previous, std::ptr::null_mut());
            }
        }
        WAKE_WRITE_FD.store(-1, Ordering::SeqCst);
        // SAFETY: both descriptors were created by wake_pipe and are closed once.
        unsafe {
            libc::close(self.wake_read);
            libc::close(self.wake_write);
        }
    }
}

/// Non-blocking, close-on-exec pipe for signal wakeups.
fn wake_pipe() -> io::Result<(RawFd, RawFd)> {
    let mut fds: [RawFd; 2] = [-1, -1];
    // SAFETY: pipe writes two descriptors into the array on success.
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    for fd in fds {
        // SAFETY: fd was just returned by pipe.
        let ok = unsafe {
            let flags = libc::fcntl(fd, libc::F_GETFL);
            flags >= 0
                && libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) == 0
                && libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC) == 0
        };
        if !ok {
            let err = io::Error::last_os_error();
            // SAFETY: closing the descriptors created above.
            unsafe {
                libc::close(fds[0]);
                libc::close(fds[1]);
            }
            return Err(err);
        }
    }
    Ok((fds[0], fds[1]))
}

fn install_handler(signum: libc::c_int) -> io::Result<libc::sigaction> {
    // SAFETY: handle_signal only touches atomics, which is async-signal-safe. The
    // sigaction structs are zeroed before use and the old action is written by the kernel.
    unsafe {
        let mut action: libc::sigaction = MaybeUninit::zeroed().assume_init();
        action.sa_sigaction = handle_signal as *const () as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&mut action.sa_mask);
        let mut previous: libc::sigaction = MaybeUninit::zeroed().assume_init();
        if libc::sigaction(signum, &action, &mut previous) != 0 {
            let err = io::Error::last_os_error();
            crate::logging::log_debug(&format!("failed to install handler for signal {signum}: {err}"));
            return Err(err);
        }
        Ok(previous)
    }
}

/// Consume a pending resize notification.
pub fn take_resize() -> bool {
    RESIZE_PENDING.swap(false, Ordering::SeqCst)
}

/// Consume a pending interrupt or termination request.
pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
