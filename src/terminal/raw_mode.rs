use crate::lock::lock_or_recover;
use crossterm::{cursor::Show, execute};
use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
    panic,
    sync::{Mutex, OnceLock},
};

struct SavedMode {
    fd: RawFd,
    termios: libc::termios,
}

static SAVED_MODE: Mutex<Option<SavedMode>> = Mutex::new(None);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

pub(crate) fn read_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios = MaybeUninit::<libc::termios>::uninit();
    // SAFETY: tcgetattr fully initializes the struct on success; fd is a live descriptor.
    let rc = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: rc == 0 means tcgetattr wrote the struct.
    Ok(unsafe { termios.assume_init() })
}

fn write_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: termios points to a valid struct; TCSAFLUSH drops unread input.
    let rc = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Erase character configured on the controlling terminal.
pub(crate) fn tty_erase_char() -> Option<u8> {
    let tty = File::open("/dev/tty").ok()?;
    let termios = read_termios(tty.as_raw_fd()).ok()?;
    let erase = termios.c_cc[libc::VERASE];
    (erase != 0 && erase != 0xff).then_some(erase)
}

/// Non-canonical, no-echo input on the terminal for as long as the guard lives.
///
/// Output post-processing stays on, so `\n` still returns to column 0. CR is not
/// translated to NL, which keeps `enter` and `ctrl-j` distinguishable.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire(fd: RawFd) -> io::Result<Self> {
        install_terminal_panic_hook();
        let original = read_termios(fd)?;
        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_iflag &= !libc::ICRNL;
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        write_termios(fd, &raw)?;
        *lock_or_recover(&SAVED_MODE, "raw_mode::acquire") = Some(SavedMode {
            fd,
            termios: original,
        });
        tracing::debug!(fd, "raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Put the saved line discipline back. Safe to call more than once.
pub fn restore_terminal() {
    let saved = lock_or_recover(&SAVED_MODE, "raw_mode::restore").take();
    if let Some(saved) = saved {
        if let Err(err) = write_termios(saved.fd, &saved.termios) {
            crate::logging::log_debug(&format!("failed to restore terminal mode: {err}"));
        }
    }
}

/// Restore the terminal before the default panic output is printed.
pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let was_raw = lock_or_recover(&SAVED_MODE, "raw_mode::panic").is_some();
            restore_terminal();
            if was_raw {
                if let Ok(mut tty) = OpenOptions::new().write(true).open("/dev/tty") {
                    let _ = execute!(tty, Show);
                    let _ = tty.flush();
                }
            }
            crate::logging::log_panic(info);
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            crate::logging::log_debug(&format!("panic at {location}"));
            previous(info);
        }));
    });
}
