//! Windows console backend.
//!
//! Generic over [`ConsoleApi`] so the same translation runs against a real
//! console handle or a [`MemoryConsole`](crate::console::memory::MemoryConsole).

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{
    Cell, ColorAttr, ConsoleModeFlags, Coordinate, CursorInfo, InputEvent, Rect, TerminalSize,
};

use super::Terminal;
use crate::console::attr::{pack_colors, pack_mode, unpack_colors, unpack_mode};
use crate::console::{ConsoleApi, RawCursorInfo, RawScreenBufferInfo, SmallRect};
use crate::{decoder, render};

/// Visible-window extent of a screen buffer.
#[must_use]
pub fn window_size(info: &RawScreenBufferInfo) -> TerminalSize {
    let w = info.window;
    let extent = |lo: i16, hi: i16| u16::try_from(i32::from(hi) - i32::from(lo) + 1).unwrap_or(0);
    TerminalSize::new(extent(w.top, w.bottom), extent(w.left, w.right))
}

/// Window rectangle of `size` anchored at the current top-left corner.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for a zero dimension or one that
/// leaves the console's coordinate range.
pub fn resized_window(current: SmallRect, size: TerminalSize) -> Result<SmallRect> {
    if size.rows == 0 || size.columns == 0 {
        return Err(TermError::invalid(format!("window size {size} has a zero dimension")));
    }
    let edge = |start: i16, cells: u16| {
        i16::try_from(i32::from(start) + i32::from(cells) - 1)
            .map_err(|_| TermError::invalid(format!("window size {size} exceeds console range")))
    };
    Ok(SmallRect::new(
        current.left,
        current.top,
        edge(current.left, size.columns)?,
        edge(current.top, size.rows)?,
    ))
}

/// Terminal backed by a Windows console handle.
#[derive(Debug)]
pub struct WindowsConsole<A: ConsoleApi> {
    api: A,
}

impl<A: ConsoleApi> WindowsConsole<A> {
    /// Wraps a console.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// The underlying console.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    pub(crate) fn raw_info(&self) -> Result<RawScreenBufferInfo> {
        self.api
            .screen_buffer_info()
            .map_err(|e| TermError::device("GetConsoleScreenBufferInfo", e))
    }
}

impl<A: ConsoleApi> Terminal for WindowsConsole<A> {
    fn name(&self) -> &'static str {
        "windows-console"
    }

    fn size(&self) -> Result<TerminalSize> {
        let size = window_size(&self.raw_info()?);
        tracing::debug!(rows = size.rows, columns = size.columns, "console window size");
        Ok(size)
    }

    fn set_size(&self, size: TerminalSize) -> Result<()> {
        let window = resized_window(self.raw_info()?.window, size)?;
        self.api
            .set_window_info(window)
            .map_err(|e| TermError::device("SetConsoleWindowInfo", e))?;
        tracing::debug!(rows = size.rows, columns = size.columns, "console window resized");
        Ok(())
    }

    fn mode(&self) -> Result<ConsoleModeFlags> {
        let word = self
            .api
            .mode()
            .map_err(|e| TermError::device("GetConsoleMode", e))?;
        Ok(unpack_mode(word))
    }

    fn set_mode(&self, flags: ConsoleModeFlags) -> Result<()> {
        let word = pack_mode(&flags);
        self.api
            .set_mode(word)
            .map_err(|e| TermError::device("SetConsoleMode", e))?;
        tracing::debug!(mode = word, "console mode set");
        Ok(())
    }

    fn text_attribute(&self) -> Result<(ColorAttr, ColorAttr)> {
        Ok(unpack_colors(self.raw_info()?.attributes))
    }

    fn set_text_attribute(&self, foreground: ColorAttr, background: ColorAttr) -> Result<()> {
        self.api
            .set_text_attribute(pack_colors(foreground, background))
            .map_err(|e| TermError::device("SetConsoleTextAttribute", e))
    }

    fn cursor_info(&self) -> Result<CursorInfo> {
        let raw = self
            .api
            .cursor_info()
            .map_err(|e| TermError::device("GetConsoleCursorInfo", e))?;
        let size = u8::try_from(raw.size).unwrap_or(u8::MAX);
        CursorInfo::new(size, raw.visible)
    }

    fn set_cursor_info(&self, info: CursorInfo) -> Result<()> {
        let raw = RawCursorInfo {
            size: u32::from(info.size),
            visible: info.visible,
        };
        self.api
            .set_cursor_info(raw)
            .map_err(|e| TermError::device("SetConsoleCursorInfo", e))
    }

    fn set_cursor_position(&self, position: Coordinate) -> Result<()> {
        let at = render::raw_coord(position)?;
        self.api
            .set_cursor_position(at)
            .map_err(|e| TermError::device("SetConsoleCursorPosition", e))
    }

    fn read_event(&self) -> Result<InputEvent> {
        decoder::read_event(&self.api)
    }

    fn write_block(&self, cells: &[Vec<Cell>], origin: Coordinate, clip: Rect) -> Result<Rect> {
        render::write_block(&self.api, cells, origin, clip)
    }

    fn fill_region(&self, ch: char, count: u32, origin: Coordinate) -> Result<u32> {
        render::fill_region(&self.api, ch, count, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::RawCoord;
    use crate::console::memory::MemoryConsole;

    fn console(rows: i16, columns: i16) -> WindowsConsole<MemoryConsole> {
        WindowsConsole::new(MemoryConsole::with_size(rows, columns))
    }

    #[test]
    fn size_comes_from_visible_window_not_buffer() {
        let api = MemoryConsole::new(RawCoord::new(120, 300), SmallRect::new(0, 250, 79, 274));
        let term = WindowsConsole::new(api);
        assert_eq!(term.size().unwrap(), TerminalSize::new(25, 80));
    }

    #[test]
    fn set_size_keeps_top_left_and_buffer() {
        let api = MemoryConsole::new(RawCoord::new(100, 50), SmallRect::new(5, 3, 84, 26));
        let term = WindowsConsole::new(api);
        term.set_size(TerminalSize::new(10, 20)).unwrap();
        let info = term.api().screen_buffer_info().unwrap();
        assert_eq!(info.window, SmallRect::new(5, 3, 24, 12));
        assert_eq!(info.size, RawCoord::new(100, 50));
        assert_eq!(term.size().unwrap(), TerminalSize::new(10, 20));
    }

    #[test]
    fn set_size_with_current_size_is_idempotent() {
        let term = console(24, 80);
        let before = term.size().unwrap();
        term.set_size(before).unwrap();
        assert_eq!(term.size().unwrap(), before);
    }

    #[test]
    fn zero_size_is_invalid_argument() {
        let err = console(24, 80).set_size(TerminalSize::new(0, 80)).unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
    }

    #[test]
    fn oversized_window_surfaces_platform_error() {
        let err = console(24, 80).set_size(TerminalSize::new(30, 80)).unwrap_err();
        assert!(matches!(err, TermError::Device { call: "SetConsoleWindowInfo", .. }));
        assert_eq!(err.raw_os_error(), Some(87));
    }

    #[test]
    fn text_attribute_round_trips() {
        let term = console(5, 5);
        let fg = ColorAttr::YELLOW.bright();
        term.set_text_attribute(fg, ColorAttr::BLUE).unwrap();
        assert_eq!(term.text_attribute().unwrap(), (fg, ColorAttr::BLUE));
    }

    #[test]
    fn cursor_info_round_trips() {
        let term = console(5, 5);
        let info = CursorInfo::new(100, false).unwrap();
        term.set_cursor_info(info).unwrap();
        assert_eq!(term.cursor_info().unwrap(), info);
    }

    #[test]
    fn cursor_position_is_zero_based_absolute() {
        let term = console(24, 80);
        term.set_cursor_position(Coordinate::new(3, 7)).unwrap();
        assert_eq!(term.api().cursor(), RawCoord::new(7, 3));
        assert!(term.set_cursor_position(Coordinate::new(24, 0)).is_err());
    }

    #[test]
    fn mode_word_carries_extended_flags() {
        let term = console(5, 5);
        term.set_mode(ConsoleModeFlags::interactive()).unwrap();
        assert_eq!(term.api().raw_mode() & 0x80, 0x80);
        assert_eq!(term.mode().unwrap(), ConsoleModeFlags::interactive());
    }

    #[test]
    fn detached_console_is_device_error() {
        let term = console(5, 5);
        term.api().detach();
        assert!(matches!(
            term.size(),
            Err(TermError::Device { call: "GetConsoleScreenBufferInfo", .. })
        ));
    }
}
