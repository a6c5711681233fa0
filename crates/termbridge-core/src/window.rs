//! Window-relative console helpers.
//!
//! Positions here are one-based and relative to the visible window: the
//! top-left character of the window is `(1, 1)`. Every helper re-reads the
//! screen buffer info before acting, so a window that moved or shrank since
//! the last call is always taken into account.

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{Coordinate, ScreenBufferInfo, TerminalSize};

use crate::backend::console::WindowsConsole;
use crate::console::attr::unpack_colors;
use crate::console::{CharInfo, ConsoleApi, RawCoord, SmallRect};
use crate::render::{self, rect_from_inclusive};

/// Translates a one-based window position into an absolute buffer position,
/// clamped into the window on both axes.
#[must_use]
pub fn window_to_buffer(window: SmallRect, pos: Coordinate) -> RawCoord {
    let axis = |value: u16, lo: i16, hi: i16| {
        let absolute = i32::from(value) + i32::from(lo) - 1;
        let clamped = absolute.clamp(i32::from(lo), i32::from(hi.max(lo)));
        // Clamped into [lo, hi], both of which are i16.
        i16::try_from(clamped).unwrap_or(lo)
    };
    RawCoord::new(
        axis(pos.column, window.left, window.right),
        axis(pos.row, window.top, window.bottom),
    )
}

/// Translates an absolute buffer position into a one-based window position.
///
/// A position above or left of the window reports as row or column 0.
#[must_use]
pub fn buffer_to_window(window: SmallRect, pos: RawCoord) -> Coordinate {
    let axis = |value: i16, lo: i16| {
        let relative = i32::from(value) - i32::from(lo) + 1;
        u16::try_from(relative.max(0)).unwrap_or(u16::MAX)
    };
    Coordinate::new(axis(pos.y, window.top), axis(pos.x, window.left))
}

fn to_u16(value: i16) -> u16 {
    u16::try_from(value).unwrap_or(0)
}

impl<A: ConsoleApi> WindowsConsole<A> {
    /// Fresh snapshot of the screen buffer.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the console cannot be queried.
    pub fn screen_buffer_info(&self) -> Result<ScreenBufferInfo> {
        let raw = self.raw_info()?;
        let (foreground, background) = unpack_colors(raw.attributes);
        Ok(ScreenBufferInfo {
            buffer_size: TerminalSize::new(to_u16(raw.size.y), to_u16(raw.size.x)),
            cursor: Coordinate::new(to_u16(raw.cursor_position.y), to_u16(raw.cursor_position.x)),
            foreground,
            background,
            window: rect_from_inclusive(raw.window),
            maximum_window_size: TerminalSize::new(
                to_u16(raw.maximum_window_size.y),
                to_u16(raw.maximum_window_size.x),
            ),
        })
    }

    /// Cursor position, one-based and relative to the window.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the console cannot be queried.
    pub fn cursor_in_window(&self) -> Result<Coordinate> {
        let raw = self.raw_info()?;
        Ok(buffer_to_window(raw.window, raw.cursor_position))
    }

    /// Moves the cursor to a one-based window position.
    ///
    /// Positions outside the window are clamped to its edge instead of
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the console cannot be queried or the
    /// move fails.
    pub fn set_cursor_in_window(&self, pos: Coordinate) -> Result<()> {
        let window = self.raw_info()?.window;
        let at = window_to_buffer(window, pos);
        self.api()
            .set_cursor_position(at)
            .map_err(|e| TermError::device("SetConsoleCursorPosition", e))?;
        tracing::trace!(row = pos.row, column = pos.column, x = at.x, y = at.y, "cursor moved");
        Ok(())
    }

    /// Writes `count` copies of `ch` from a one-based window position.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a character outside the Basic
    /// Multilingual Plane and `TermError::Device` if a console call fails.
    pub fn fill_in_window(&self, ch: char, count: u32, pos: Coordinate) -> Result<u32> {
        let unit = render::utf16_unit(ch)?;
        let at = window_to_buffer(self.raw_info()?.window, pos);
        self.api()
            .fill_output_character(unit, count, at)
            .map_err(|e| TermError::device("FillConsoleOutputCharacter", e))
    }

    /// Scrolls the whole buffer up by `lines`, blanking the rows uncovered at
    /// the bottom with the current attributes.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if a console call fails.
    pub fn scroll_up(&self, lines: u16) -> Result<()> {
        if lines == 0 {
            return Ok(());
        }
        let raw = self.raw_info()?;
        let whole = SmallRect::new(0, 0, raw.size.x - 1, raw.size.y - 1);
        let shift = i16::try_from(lines).unwrap_or(i16::MAX);
        let fill = CharInfo {
            ch: u16::from(b' '),
            attributes: raw.attributes,
        };
        self.api()
            .scroll(whole, whole, RawCoord::new(0, -shift), fill)
            .map_err(|e| TermError::device("ScrollConsoleScreenBuffer", e))?;
        tracing::debug!(lines, "buffer scrolled");
        Ok(())
    }

    /// Resizes the whole screen buffer, not just the window.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a size outside the console's
    /// coordinate range and `TermError::Device` if the console rejects it,
    /// e.g. when the buffer would be smaller than the window.
    pub fn set_buffer_size(&self, size: TerminalSize) -> Result<()> {
        let raw = render::raw_coord(Coordinate::new(size.rows, size.columns))?;
        self.api()
            .set_buffer_size(raw)
            .map_err(|e| TermError::device("SetConsoleScreenBufferSize", e))?;
        tracing::debug!(rows = size.rows, columns = size.columns, "buffer resized");
        Ok(())
    }

    /// System ANSI code page.
    #[must_use]
    pub fn ansi_code_page(&self) -> u32 {
        self.api().ansi_code_page()
    }

    /// Code page used to decode console input.
    #[must_use]
    pub fn input_code_page(&self) -> u32 {
        self.api().input_code_page()
    }

    /// Changes the input code page.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the code page is not available.
    pub fn set_input_code_page(&self, code_page: u32) -> Result<()> {
        self.api()
            .set_input_code_page(code_page)
            .map_err(|e| TermError::device("SetConsoleCP", e))
    }

    /// Code page used to encode console output.
    #[must_use]
    pub fn output_code_page(&self) -> u32 {
        self.api().output_code_page()
    }

    /// Changes the output code page.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the code page is not available.
    pub fn set_output_code_page(&self, code_page: u32) -> Result<()> {
        self.api()
            .set_output_code_page(code_page)
            .map_err(|e| TermError::device("SetConsoleOutputCP", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::memory::MemoryConsole;

    fn scrolled_console() -> WindowsConsole<MemoryConsole> {
        // 80x24 window showing rows 100..=123 of a 300-row buffer.
        WindowsConsole::new(MemoryConsole::new(
            RawCoord::new(80, 300),
            SmallRect::new(0, 100, 79, 123),
        ))
    }

    #[test]
    fn one_one_is_window_top_left() {
        let window = SmallRect::new(0, 0, 79, 23);
        assert_eq!(window_to_buffer(window, Coordinate::new(1, 1)), RawCoord::new(0, 0));
    }

    #[test]
    fn column_past_right_edge_clamps() {
        let window = SmallRect::new(0, 0, 79, 23);
        assert_eq!(window_to_buffer(window, Coordinate::new(1, 100)), RawCoord::new(79, 0));
        assert_eq!(window_to_buffer(window, Coordinate::new(0, 0)), RawCoord::new(0, 0));
    }

    #[test]
    fn translation_follows_window_origin() {
        let window = SmallRect::new(10, 100, 89, 123);
        let raw = window_to_buffer(window, Coordinate::new(5, 3));
        assert_eq!(raw, RawCoord::new(12, 104));
        assert_eq!(buffer_to_window(window, raw), Coordinate::new(5, 3));
    }

    #[test]
    fn cursor_round_trips_through_window() {
        let term = scrolled_console();
        term.set_cursor_in_window(Coordinate::new(2, 7)).unwrap();
        assert_eq!(term.api().cursor(), RawCoord::new(6, 101));
        assert_eq!(term.cursor_in_window().unwrap(), Coordinate::new(2, 7));
    }

    #[test]
    fn fill_in_window_starts_at_translated_cell() {
        let term = scrolled_console();
        let written = term.fill_in_window('-', 3, Coordinate::new(1, 2)).unwrap();
        assert_eq!(written, 3);
        assert!(term.api().row_text(100).starts_with(" ---"));
    }

    #[test]
    fn scroll_up_moves_content_and_blanks_bottom() {
        let term = WindowsConsole::new(MemoryConsole::with_size(3, 4));
        let _ = term.api().fill_output_character(u16::from(b'b'), 4, RawCoord::new(0, 1)).unwrap();
        term.scroll_up(1).unwrap();
        assert_eq!(term.api().row_text(0), "bbbb");
        assert_eq!(term.api().row_text(1), "    ");
        assert_eq!(term.api().row_text(2), "    ");
    }

    #[test]
    fn scroll_past_buffer_blanks_everything() {
        let term = WindowsConsole::new(MemoryConsole::with_size(2, 2));
        let _ = term.api().fill_output_character(u16::from(b'x'), 4, RawCoord::new(0, 0)).unwrap();
        term.scroll_up(10).unwrap();
        assert_eq!(term.api().row_text(0), "  ");
        assert_eq!(term.api().row_text(1), "  ");
    }

    #[test]
    fn buffer_info_is_fresh_each_call() {
        let term = scrolled_console();
        let before = term.screen_buffer_info().unwrap();
        assert_eq!(before.window, termbridge_common::types::Rect::new(100, 0, 124, 80));
        assert_eq!(before.buffer_size, TerminalSize::new(300, 80));
        term.api().set_window_info(SmallRect::new(0, 0, 39, 9)).unwrap();
        let after = term.screen_buffer_info().unwrap();
        assert_eq!(after.window, termbridge_common::types::Rect::new(0, 0, 10, 40));
    }

    #[test]
    fn buffer_smaller_than_window_is_rejected() {
        let term = WindowsConsole::new(MemoryConsole::with_size(24, 80));
        let err = term.set_buffer_size(TerminalSize::new(10, 80)).unwrap_err();
        assert!(matches!(err, TermError::Device { call: "SetConsoleScreenBufferSize", .. }));
        term.set_buffer_size(TerminalSize::new(500, 80)).unwrap();
        assert_eq!(term.screen_buffer_info().unwrap().buffer_size, TerminalSize::new(500, 80));
    }

    #[test]
    fn code_pages_are_read_back() {
        let term = WindowsConsole::new(MemoryConsole::with_size(2, 2));
        term.set_output_code_page(65001).unwrap();
        assert_eq!(term.output_code_page(), 65001);
        assert_eq!(term.input_code_page(), 437);
        assert!(term.set_input_code_page(0).is_err());
        assert_eq!(term.ansi_code_page(), 1252);
    }
}
