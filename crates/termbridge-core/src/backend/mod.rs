//! Terminal backend abstraction for platform-agnostic operation.
//!
//! One backend is chosen per stream when the process starts; call sites
//! only ever see `dyn Terminal`.

pub mod console;
pub mod env;
#[cfg(unix)]
pub mod unix;

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{
    Cell, ColorAttr, ConsoleModeFlags, Coordinate, CursorInfo, InputEvent, Rect, TerminalSize,
};

/// Which standard stream a backend is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Standard input: modes and input events.
    Input,
    /// Standard output: size, attributes, cursor and cell output.
    Output,
}

/// Platform-agnostic terminal backend.
///
/// Every method is one synchronous round-trip to the OS on a caller-owned
/// handle. Nothing is cached between calls. Callers must not invoke two
/// methods on the same handle concurrently.
///
/// Only [`Terminal::name`] and [`Terminal::size`] are mandatory; a backend
/// leaves out what its platform cannot do and the default reports an
/// unsupported-primitive [`TermError::Device`].
pub trait Terminal: Send + Sync {
    /// Short backend identifier, e.g. `"unix"`.
    fn name(&self) -> &'static str;

    /// Returns the visible terminal size.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the size cannot be queried.
    fn size(&self) -> Result<TerminalSize>;

    /// Resizes the visible terminal area.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the platform rejects the size and
    /// `TermError::InvalidArgument` for a zero dimension.
    fn set_size(&self, _size: TerminalSize) -> Result<()> {
        Err(TermError::unsupported("set_size"))
    }

    /// Reads the input mode.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the mode cannot be read.
    fn mode(&self) -> Result<ConsoleModeFlags> {
        Err(TermError::unsupported("mode"))
    }

    /// Replaces the input mode as a whole.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the platform rejects the mode. Flags
    /// the backend cannot express are ignored.
    fn set_mode(&self, _flags: ConsoleModeFlags) -> Result<()> {
        Err(TermError::unsupported("set_mode"))
    }

    /// Returns the current foreground and background colors.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the attributes cannot be read.
    fn text_attribute(&self) -> Result<(ColorAttr, ColorAttr)> {
        Err(TermError::unsupported("text_attribute"))
    }

    /// Sets the colors used for subsequent text output.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the platform call fails.
    fn set_text_attribute(&self, _foreground: ColorAttr, _background: ColorAttr) -> Result<()> {
        Err(TermError::unsupported("set_text_attribute"))
    }

    /// Returns the cursor shape.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the cursor cannot be queried.
    fn cursor_info(&self) -> Result<CursorInfo> {
        Err(TermError::unsupported("cursor_info"))
    }

    /// Sets the cursor shape.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the platform call fails.
    fn set_cursor_info(&self, _info: CursorInfo) -> Result<()> {
        Err(TermError::unsupported("set_cursor_info"))
    }

    /// Moves the cursor to a zero-based absolute buffer position.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the position is rejected.
    fn set_cursor_position(&self, _position: Coordinate) -> Result<()> {
        Err(TermError::unsupported("set_cursor_position"))
    }

    /// Blocks until the next input event.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the underlying read fails. The handle
    /// must be re-acquired before reading again.
    fn read_event(&self) -> Result<InputEvent> {
        Err(TermError::unsupported("read_event"))
    }

    /// Writes a grid of cells in one bulk call.
    ///
    /// `origin` is the grid cell that lands on the top-left corner of
    /// `clip`. Returns the rectangle actually written, with exclusive
    /// bottom and right edges.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a ragged grid or a cell the
    /// platform cannot represent, and `TermError::Device` if the write fails.
    fn write_block(&self, _cells: &[Vec<Cell>], _origin: Coordinate, _clip: Rect) -> Result<Rect> {
        Err(TermError::unsupported("write_block"))
    }

    /// Writes `count` copies of `ch` in row-major order from `origin`.
    ///
    /// Returns the number of cells written, which is short when the fill
    /// runs past the end of the buffer.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a character the platform
    /// cannot represent, and `TermError::Device` if the fill fails.
    fn fill_region(&self, _ch: char, _count: u32, _origin: Coordinate) -> Result<u32> {
        Err(TermError::unsupported("fill_region"))
    }
}

/// Creates the backend for `stream` on the current platform.
#[must_use]
pub fn detect_backend(stream: Stream) -> Box<dyn Terminal> {
    #[cfg(unix)]
    {
        let terminal = match stream {
            Stream::Input => unix::UnixTerminal::stdin(),
            Stream::Output => unix::UnixTerminal::stdout(),
        };
        Box::new(terminal)
    }
    #[cfg(windows)]
    {
        match crate::console::win32::Win32Console::std_handle(stream) {
            Ok(api) => Box::new(console::WindowsConsole::new(api)),
            Err(e) => {
                tracing::warn!(stream = ?stream, error = %e, "no console attached, using environment");
                Box::new(env::EnvTerminal::new())
            }
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = stream;
        Box::new(env::EnvTerminal::new())
    }
}

/// Information about the current platform and its terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Host operating system name.
    pub os: String,
    /// Host CPU architecture.
    pub arch: String,
    /// Name of the backend [`detect_backend`] selects.
    pub backend: &'static str,
    /// Signal number delivered on window resize, if the platform has one.
    pub resize_signal: Option<i32>,
}

/// Returns information about the current platform and backend.
#[must_use]
pub fn platform_info() -> PlatformInfo {
    let backend = if cfg!(unix) {
        "unix"
    } else if cfg!(windows) {
        "windows-console"
    } else {
        "env"
    };
    PlatformInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        backend,
        resize_signal: crate::encoding::resize_signal(),
    }
}
