use super::raw_mode::RawModeGuard;
use super::signals::{self, SignalGuard};
use crossterm::terminal::size as terminal_size;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, RawFd};

/// Escape sequences are short; one read never needs more than this.
const READ_CHUNK: usize = 80;

/// What the input loop gets back from one blocking read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Bytes(Vec<u8>),
    Resize,
    Interrupt,
}

/// The terminal the menu draws on and reads from.
pub trait MenuTerminal {
    /// Block until input, a resize, or an interrupt arrives.
    fn read_input(&mut self) -> io::Result<InputEvent>;

    /// Current size as `(columns, rows)`.
    fn size(&self) -> (usize, usize);

    fn output(&mut self) -> &mut dyn Write;
}

/// The controlling terminal (`/dev/tty`) in raw mode with signal handlers installed.
///
/// Dropping it restores the previous signal dispositions and line discipline.
pub struct TtyTerminal {
    // Fields drop in declaration order: both guards must run while `tty` is open.
    _raw: RawModeGuard,
    signals: SignalGuard,
    tty: File,
}

impl TtyTerminal {
    pub fn open() -> io::Result<Self> {
        let tty = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
        let raw = RawModeGuard::acquire(tty.as_raw_fd())?;
        let signals = SignalGuard::install()?;
        Ok(Self {
            _raw: raw,
            signals,
            tty,
        })
    }
}

impl MenuTerminal for TtyTerminal {
    fn read_input(&mut self) -> io::Result<InputEvent> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if signals::take_interrupt() {
                return Ok(InputEvent::Interrupt);
            }
            if signals::take_resize() {
                return Ok(InputEvent::Resize);
            }
            if wait_readable(self.tty.as_raw_fd(), &self.signals)? == Readiness::Signal {
                self.signals.drain_wakeups();
                continue;
            }
            match self.tty.read(&mut buf) {
                Ok(0) => return Ok(InputEvent::Interrupt),
                Ok(n) => return Ok(InputEvent::Bytes(buf[..n].to_vec())),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    fn size(&self) -> (usize, usize) {
        tty_size(&self.tty)
            .or_else(|| terminal_size().ok())
            .map(|(cols, rows)| (usize::from(cols), usize::from(rows)))
            .filter(|(cols, rows)| *cols > 0 && *rows > 0)
            .unwrap_or((80, 24))
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.tty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Input,
    Signal,
}

/// Block until `input` is readable or a watched signal has arrived.
///
/// Signals that landed before the call have already written to the wake pipe,
/// so this returns at once instead of waiting for the next key.
fn wait_readable(input: RawFd, signals: &SignalGuard) -> io::Result<Readiness> {
    let mut fds = [
        libc::pollfd {
            fd: input,
            events: libc::POLLIN,
            revents: 0,
        },
        libc::pollfd {
            fd: signals.wake_fd(),
            events: libc::POLLIN,
            revents: 0,
        },
    ];
    loop {
        // SAFETY: fds is a valid array of two pollfd structs.
        let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(Readiness::Signal);
            }
            return Err(err);
        }
        if fds[1].revents & libc::POLLIN != 0 {
            return Ok(Readiness::Signal);
        }
        // Hangup and errors count as input; the following read reports them.
        if fds[0].revents != 0 {
            return Ok(Readiness::Input);
        }
    }
}

fn tty_size(tty: &File) -> Option<(u16, u16)> {
    let mut winsize = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a winsize into the provided struct.
    let rc = unsafe { libc::ioctl(tty.as_raw_fd(), libc::TIOCGWINSZ, &mut winsize) };
    (rc == 0 && winsize.ws_col > 0 && winsize.ws_row > 0).then_some((winsize.ws_col, winsize.ws_row))
}
