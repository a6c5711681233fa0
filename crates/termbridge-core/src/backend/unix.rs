//! POSIX backend: window size through ioctl, input mode through termios.

use std::io;
use std::os::fd::{BorrowedFd, RawFd};

use nix::libc;
use nix::sys::termios::{self, LocalFlags, SetArg};
use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{ConsoleModeFlags, TerminalSize};

use super::Terminal;

nix::ioctl_read_bad!(
    /// `TIOCGWINSZ`.
    tiocgwinsz,
    libc::TIOCGWINSZ,
    libc::winsize
);
nix::ioctl_write_ptr_bad!(
    /// `TIOCSWINSZ`.
    tiocswinsz,
    libc::TIOCSWINSZ,
    libc::winsize
);

/// Terminal attached to a caller-owned file descriptor.
///
/// The descriptor is never closed by this type.
#[derive(Debug, Clone, Copy)]
pub struct UnixTerminal {
    fd: RawFd,
}

impl UnixTerminal {
    /// Wraps a file descriptor.
    #[must_use]
    pub const fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// Standard input.
    #[must_use]
    pub const fn stdin() -> Self {
        Self::new(libc::STDIN_FILENO)
    }

    /// Standard output.
    #[must_use]
    pub const fn stdout() -> Self {
        Self::new(libc::STDOUT_FILENO)
    }

    /// The wrapped descriptor.
    #[must_use]
    pub const fn fd(&self) -> RawFd {
        self.fd
    }

    fn borrowed(&self) -> BorrowedFd<'_> {
        // SAFETY: the descriptor is only handed to termios calls, which
        // report EBADF for a descriptor the caller has already closed.
        unsafe { BorrowedFd::borrow_raw(self.fd) }
    }

    fn winsize(&self) -> Result<libc::winsize> {
        let mut ws = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: `ws` is a valid, writable winsize for the duration of the call.
        unsafe { tiocgwinsz(self.fd, &raw mut ws) }
            .map_err(|e| TermError::device("ioctl(TIOCGWINSZ)", io::Error::from(e)))?;
        Ok(ws)
    }

    fn termios(&self) -> Result<termios::Termios> {
        termios::tcgetattr(self.borrowed())
            .map_err(|e| TermError::device("tcgetattr", io::Error::from(e)))
    }
}

/// Scales a pixel extent to a new cell count.
///
/// A zero previous count leaves the extent as it was.
fn rescale(pixels: u16, old_cells: u16, new_cells: u16) -> u16 {
    if old_cells == 0 {
        return pixels;
    }
    let scaled = u32::from(pixels) * u32::from(new_cells) / u32::from(old_cells);
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// Computes the `winsize` written for a resize, keeping the per-cell pixel ratio.
#[must_use]
pub fn resized(current: &libc::winsize, size: TerminalSize) -> libc::winsize {
    libc::winsize {
        ws_row: size.rows,
        ws_col: size.columns,
        ws_xpixel: rescale(current.ws_xpixel, current.ws_col, size.columns),
        ws_ypixel: rescale(current.ws_ypixel, current.ws_row, size.rows),
    }
}

/// Reads the mode flags termios can express.
#[must_use]
pub fn flags_from_local(local: LocalFlags) -> ConsoleModeFlags {
    ConsoleModeFlags {
        echo_input: local.contains(LocalFlags::ECHO),
        line_input: local.contains(LocalFlags::ICANON),
        processed_input: local.contains(LocalFlags::ISIG),
        ..ConsoleModeFlags::default()
    }
}

/// Applies `flags` to a set of local flags, leaving unrelated bits alone.
///
/// Console-only flags have no termios counterpart and are skipped.
pub fn apply_flags(local: &mut LocalFlags, flags: ConsoleModeFlags) {
    let console_only = [
        ("insert_mode", flags.insert_mode),
        ("mouse_input", flags.mouse_input),
        ("quick_edit_mode", flags.quick_edit_mode),
        ("window_input", flags.window_input),
    ];
    for (name, _) in console_only.iter().filter(|(_, on)| *on) {
        tracing::debug!(flag = name, "no termios equivalent, skipped");
    }
    local.set(LocalFlags::ECHO, flags.echo_input);
    local.set(LocalFlags::ICANON, flags.line_input);
    local.set(LocalFlags::ISIG, flags.processed_input);
}

impl Terminal for UnixTerminal {
    fn name(&self) -> &'static str {
        "unix"
    }

    fn size(&self) -> Result<TerminalSize> {
        let ws = self.winsize()?;
        let size = TerminalSize::new(ws.ws_row, ws.ws_col);
        tracing::debug!(fd = self.fd, rows = size.rows, columns = size.columns, "window size");
        Ok(size)
    }

    fn set_size(&self, size: TerminalSize) -> Result<()> {
        let current = self.winsize()?;
        let next = resized(&current, size);
        // SAFETY: `next` is a valid winsize that outlives the call.
        unsafe { tiocswinsz(self.fd, &raw const next) }
            .map_err(|e| TermError::device("ioctl(TIOCSWINSZ)", io::Error::from(e)))?;
        tracing::debug!(fd = self.fd, rows = size.rows, columns = size.columns, "window resized");
        Ok(())
    }

    fn mode(&self) -> Result<ConsoleModeFlags> {
        Ok(flags_from_local(self.termios()?.local_flags))
    }

    fn set_mode(&self, flags: ConsoleModeFlags) -> Result<()> {
        let mut attrs = self.termios()?;
        apply_flags(&mut attrs.local_flags, flags);
        termios::tcsetattr(self.borrowed(), SetArg::TCSANOW, &attrs)
            .map_err(|e| TermError::device("tcsetattr", io::Error::from(e)))?;
        tracing::debug!(fd = self.fd, mode = ?flags, "termios mode set");
        Ok(())
    }
}
