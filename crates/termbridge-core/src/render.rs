//! Cell output: bulk block writes and repeated-character fills.
//!
//! Rectangles cross this boundary with exclusive bottom and right edges and
//! are converted to the console's inclusive convention here, in both
//! directions, so callers never see the platform's off-by-one.

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{Cell, Coordinate, Rect};

use crate::console::attr::pack_colors;
use crate::console::{CharInfo, ConsoleApi, RawCoord, SmallRect};

/// Encodes a character as the single UTF-16 unit a console cell holds.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for a character outside the Basic
/// Multilingual Plane.
pub fn utf16_unit(ch: char) -> Result<u16> {
    u16::try_from(u32::from(ch)).map_err(|_| {
        TermError::invalid(format!(
            "U+{:04X} does not fit in one console cell",
            u32::from(ch)
        ))
    })
}

fn to_i16(value: usize, what: &str) -> Result<i16> {
    i16::try_from(value).map_err(|_| TermError::invalid(format!("{what} {value} exceeds console range")))
}

fn clamp_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Converts a zero-based coordinate into a console `COORD`.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` if either component exceeds `i16::MAX`.
pub fn raw_coord(pos: Coordinate) -> Result<RawCoord> {
    Ok(RawCoord::new(
        to_i16(usize::from(pos.column), "column")?,
        to_i16(usize::from(pos.row), "row")?,
    ))
}

/// Flattens a grid of cells into the console's row-major buffer.
///
/// Returns the buffer and its dimensions (`x` columns, `y` rows).
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for an empty or ragged grid, a grid
/// too large for the console, or a cell outside the Basic Multilingual Plane.
pub fn flatten(cells: &[Vec<Cell>]) -> Result<(Vec<CharInfo>, RawCoord)> {
    let columns = cells.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(TermError::invalid("cell grid is empty"));
    }
    if let Some(row) = cells.iter().position(|r| r.len() != columns) {
        return Err(TermError::invalid(format!(
            "row {row} has {} cells, expected {columns}",
            cells[row].len()
        )));
    }
    let size = RawCoord::new(to_i16(columns, "width")?, to_i16(cells.len(), "height")?);

    let mut buffer = Vec::with_capacity(columns * cells.len());
    for cell in cells.iter().flatten() {
        buffer.push(CharInfo {
            ch: utf16_unit(cell.codepoint)?,
            attributes: pack_colors(cell.foreground, cell.background),
        });
    }
    Ok((buffer, size))
}

/// Converts an exclusive rectangle into an inclusive `SMALL_RECT`.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for an empty rectangle or one that
/// exceeds the console's coordinate range.
pub fn rect_to_inclusive(rect: Rect) -> Result<SmallRect> {
    if rect.is_empty() {
        return Err(TermError::invalid(format!("rectangle {rect:?} covers no cell")));
    }
    Ok(SmallRect::new(
        to_i16(usize::from(rect.left), "left")?,
        to_i16(usize::from(rect.top), "top")?,
        to_i16(usize::from(rect.right) - 1, "right")?,
        to_i16(usize::from(rect.bottom) - 1, "bottom")?,
    ))
}

/// Converts an inclusive `SMALL_RECT` into an exclusive rectangle.
///
/// Negative edges clamp to zero; an inverted rectangle comes back empty.
#[must_use]
pub fn rect_from_inclusive(rect: SmallRect) -> Rect {
    let top = clamp_u16(i32::from(rect.top));
    let left = clamp_u16(i32::from(rect.left));
    Rect::new(
        top,
        left,
        clamp_u16(i32::from(rect.bottom) + 1).max(top),
        clamp_u16(i32::from(rect.right) + 1).max(left),
    )
}

/// Writes `cells` into `clip` with one bulk console call.
///
/// `origin` selects the grid cell placed at the top-left of `clip`. Returns
/// the rectangle actually written after the console clips it.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for a malformed grid, origin or clip
/// and `TermError::Device` if the write fails. Cells written before a
/// failure are not rolled back.
pub fn write_block<A: ConsoleApi + ?Sized>(
    api: &A,
    cells: &[Vec<Cell>],
    origin: Coordinate,
    clip: Rect,
) -> Result<Rect> {
    let (buffer, size) = flatten(cells)?;
    let source = raw_coord(origin)?;
    if source.x >= size.x || source.y >= size.y {
        return Err(TermError::invalid(format!(
            "origin {origin:?} lies outside the {}x{} grid",
            size.x, size.y
        )));
    }
    let region = rect_to_inclusive(clip)?;
    let written = api
        .write_output(&buffer, size, source, region)
        .map_err(|e| TermError::device("WriteConsoleOutput", e))?;
    let written = rect_from_inclusive(written);
    tracing::debug!(requested = ?clip, written = ?written, "block written");
    Ok(written)
}

/// Writes `count` copies of `ch` in row-major order from `origin`.
///
/// A count running past the end of the buffer is truncated by the console
/// and reported through the returned count.
///
/// # Errors
///
/// Returns `TermError::InvalidArgument` for a character or origin the
/// console cannot represent and `TermError::Device` if the fill fails.
pub fn fill_region<A: ConsoleApi + ?Sized>(
    api: &A,
    ch: char,
    count: u32,
    origin: Coordinate,
) -> Result<u32> {
    let unit = utf16_unit(ch)?;
    let at = raw_coord(origin)?;
    let written = api
        .fill_output_character(unit, count, at)
        .map_err(|e| TermError::device("FillConsoleOutputCharacter", e))?;
    if written < count {
        tracing::debug!(requested = count, written, "fill truncated at buffer end");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::memory::MemoryConsole;
    use termbridge_common::types::ColorAttr;

    fn row(text: &str) -> Vec<Cell> {
        text.chars()
            .map(|c| Cell::new(c, ColorAttr::WHITE, ColorAttr::BLUE))
            .collect()
    }

    #[test]
    fn flatten_is_row_major_with_packed_colors() {
        let (buffer, size) = flatten(&[row("ab"), row("cd")]).unwrap();
        assert_eq!(size, RawCoord::new(2, 2));
        let text: String = buffer.iter().map(|c| char::from(u8::try_from(c.ch).unwrap())).collect();
        assert_eq!(text, "abcd");
        assert!(buffer.iter().all(|c| c.attributes == 0x17));
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let err = flatten(&[row("abc"), row("d")]).unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
        assert!(flatten(&[]).is_err());
    }

    #[test]
    fn astral_codepoint_is_rejected() {
        let grid = vec![vec![Cell::new('\u{1F600}', ColorAttr::WHITE, ColorAttr::BLACK)]];
        assert!(matches!(flatten(&grid), Err(TermError::InvalidArgument { .. })));
    }

    #[test]
    fn rect_conversions_shift_exclusive_edges() {
        let inclusive = rect_to_inclusive(Rect::new(1, 2, 5, 10)).unwrap();
        assert_eq!(inclusive, SmallRect::new(2, 1, 9, 4));
        assert_eq!(rect_from_inclusive(inclusive), Rect::new(1, 2, 5, 10));
        assert!(rect_to_inclusive(Rect::new(3, 3, 3, 9)).is_err());
    }

    #[test]
    fn inverted_platform_rect_comes_back_empty() {
        let rect = rect_from_inclusive(SmallRect::new(5, 5, 3, 3));
        assert!(rect.is_empty());
    }

    #[test]
    fn write_block_reports_clipped_rect_exclusive() {
        let console = MemoryConsole::with_size(24, 80);
        let grid = vec![row("hello"), row("world")];
        let written =
            write_block(&console, &grid, Coordinate::new(0, 0), Rect::new(23, 77, 25, 82)).unwrap();
        assert_eq!(written, Rect::new(23, 77, 24, 80));
        assert!(console.row_text(23).ends_with("hel"));
    }

    #[test]
    fn write_block_origin_selects_grid_cell() {
        let console = MemoryConsole::with_size(4, 10);
        let grid = vec![row("abcd"), row("efgh")];
        let written =
            write_block(&console, &grid, Coordinate::new(1, 2), Rect::new(0, 0, 1, 2)).unwrap();
        assert_eq!(written, Rect::new(0, 0, 1, 2));
        assert!(console.row_text(0).starts_with("gh"));
    }

    #[test]
    fn origin_outside_grid_is_rejected() {
        let console = MemoryConsole::with_size(4, 10);
        let err = write_block(&console, &[row("ab")], Coordinate::new(1, 0), Rect::new(0, 0, 1, 1))
            .unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
    }

    #[test]
    fn fill_past_buffer_end_is_short_not_error() {
        let console = MemoryConsole::with_size(24, 80);
        let written = fill_region(&console, '*', 500, Coordinate::new(23, 70)).unwrap();
        assert_eq!(written, 10);
    }

    #[test]
    fn device_failure_names_the_call() {
        let console = MemoryConsole::with_size(2, 2);
        console.detach();
        let err = fill_region(&console, ' ', 1, Coordinate::new(0, 0)).unwrap_err();
        assert!(matches!(err, TermError::Device { call: "FillConsoleOutputCharacter", .. }));
    }
}
