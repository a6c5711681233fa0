//! Windows console surface.
//!
//! The structures here mirror the Win32 console records field for field,
//! using their documented numeric encodings. [`ConsoleApi`] is the seam:
//! one method per console primitive, each a single synchronous round-trip.
//! [`win32::Win32Console`] drives a real console handle on Windows and
//! [`memory::MemoryConsole`] simulates one in-process on every platform.

pub mod attr;
pub mod consts;
pub mod memory;
#[cfg(windows)]
pub mod win32;

use std::io;

/// A `COORD`: column `x`, row `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawCoord {
    /// Column.
    pub x: i16,
    /// Row.
    pub y: i16,
}

impl RawCoord {
    /// Creates a coordinate from a column and a row.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A `SMALL_RECT`. All four edges are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SmallRect {
    /// Leftmost column.
    pub left: i16,
    /// Top row.
    pub top: i16,
    /// Rightmost column.
    pub right: i16,
    /// Bottom row.
    pub bottom: i16,
}

impl SmallRect {
    /// Creates a rectangle from its inclusive edges.
    #[must_use]
    pub const fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A `CHAR_INFO`: one UTF-16 unit plus its attribute word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CharInfo {
    /// UTF-16 code unit.
    pub ch: u16,
    /// Packed color attribute word.
    pub attributes: u16,
}

/// A `CONSOLE_SCREEN_BUFFER_INFO`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawScreenBufferInfo {
    /// Full buffer dimensions.
    pub size: RawCoord,
    /// Absolute cursor position.
    pub cursor_position: RawCoord,
    /// Current attribute word.
    pub attributes: u16,
    /// Visible window, inclusive.
    pub window: SmallRect,
    /// Largest possible window.
    pub maximum_window_size: RawCoord,
}

/// A `CONSOLE_CURSOR_INFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCursorInfo {
    /// Percentage of the cell filled.
    pub size: u32,
    /// Visibility.
    pub visible: bool,
}

/// A `KEY_EVENT_RECORD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyRecord {
    /// True on press, false on release.
    pub key_down: bool,
    /// Auto-repeat count.
    pub repeat_count: u16,
    /// Virtual-key code.
    pub virtual_key_code: u16,
    /// Hardware scan code.
    pub virtual_scan_code: u16,
    /// UTF-16 character produced, or 0.
    pub unicode_char: u16,
    /// Control-key state bitmask.
    pub control_key_state: u32,
}

/// A `MOUSE_EVENT_RECORD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseRecord {
    /// Absolute buffer position.
    pub position: RawCoord,
    /// Pressed-button bitmask.
    pub button_state: u32,
    /// Control-key state bitmask.
    pub control_key_state: u32,
    /// Event kind flags (moved, double click, wheel).
    pub event_flags: u32,
}

/// One `INPUT_RECORD` as returned by a blocking console read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputRecord {
    /// `KEY_EVENT`.
    Key(KeyRecord),
    /// `MOUSE_EVENT`.
    Mouse(MouseRecord),
    /// `WINDOW_BUFFER_SIZE_EVENT`, carrying the new buffer size.
    WindowBufferSize(RawCoord),
    /// `MENU_EVENT`, carrying the command id.
    Menu(u32),
    /// `FOCUS_EVENT`, carrying whether focus was gained.
    Focus(bool),
}

/// Primitive console operations on one console handle.
///
/// Implementations perform exactly one platform call per method and never
/// cache results. The handle is owned by the caller.
pub trait ConsoleApi: Send + Sync {
    /// `GetConsoleScreenBufferInfo`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the handle is not a console output buffer.
    fn screen_buffer_info(&self) -> io::Result<RawScreenBufferInfo>;

    /// `SetConsoleWindowInfo` with absolute coordinates.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the window cannot take the requested shape.
    fn set_window_info(&self, window: SmallRect) -> io::Result<()>;

    /// `SetConsoleScreenBufferSize`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the buffer cannot be resized.
    fn set_buffer_size(&self, size: RawCoord) -> io::Result<()>;

    /// `GetConsoleMode`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the handle is not a console.
    fn mode(&self) -> io::Result<u32>;

    /// `SetConsoleMode`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the mode is rejected.
    fn set_mode(&self, mode: u32) -> io::Result<()>;

    /// `SetConsoleTextAttribute`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the handle is not a console output buffer.
    fn set_text_attribute(&self, attributes: u16) -> io::Result<()>;

    /// `GetConsoleCursorInfo`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the handle is not a console output buffer.
    fn cursor_info(&self) -> io::Result<RawCursorInfo>;

    /// `SetConsoleCursorInfo`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the cursor shape is rejected.
    fn set_cursor_info(&self, info: RawCursorInfo) -> io::Result<()>;

    /// `SetConsoleCursorPosition`, zero-based absolute buffer coordinates.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the position lies outside the buffer.
    fn set_cursor_position(&self, position: RawCoord) -> io::Result<()>;

    /// `ReadConsoleInputW` for a single record. Blocks until one arrives.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the read fails, e.g. the handle was closed.
    fn read_input(&self) -> io::Result<RawInputRecord>;

    /// `WriteConsoleOutputW`. `buffer` is row-major with `size.x` columns.
    /// Returns the region actually written, inclusive.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the write fails.
    fn write_output(
        &self,
        buffer: &[CharInfo],
        size: RawCoord,
        origin: RawCoord,
        region: SmallRect,
    ) -> io::Result<SmallRect>;

    /// `FillConsoleOutputCharacterW`. Returns how many cells were written.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the fill fails.
    fn fill_output_character(&self, ch: u16, count: u32, at: RawCoord) -> io::Result<u32>;

    /// `ScrollConsoleScreenBufferW`. Moves `scroll` so its top-left lands on
    /// `destination`, blanking vacated cells with `fill`. Cells outside `clip`
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the scroll fails.
    fn scroll(
        &self,
        scroll: SmallRect,
        clip: SmallRect,
        destination: RawCoord,
        fill: CharInfo,
    ) -> io::Result<()>;

    /// `GetACP`.
    fn ansi_code_page(&self) -> u32;

    /// `GetConsoleCP`.
    fn input_code_page(&self) -> u32;

    /// `SetConsoleCP`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the code page is not installed.
    fn set_input_code_page(&self, code_page: u32) -> io::Result<()>;

    /// `GetConsoleOutputCP`.
    fn output_code_page(&self) -> u32;

    /// `SetConsoleOutputCP`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the code page is not installed.
    fn set_output_code_page(&self, code_page: u32) -> io::Result<()>;
}
