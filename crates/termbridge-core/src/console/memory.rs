//! In-process simulated console.
//!
//! [`MemoryConsole`] keeps a screen buffer, a visible window, a cursor and a
//! queue of pending input records, and answers every [`ConsoleApi`] call the
//! way a real console does: writes are clipped to the buffer, fills stop at
//! its last cell, and out-of-range arguments fail with
//! `ERROR_INVALID_PARAMETER`. When the input queue runs dry the read fails,
//! as a read on an invalidated handle would.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::consts::{
    ENABLE_ECHO_INPUT, ENABLE_EXTENDED_FLAGS, ENABLE_INSERT_MODE, ENABLE_LINE_INPUT,
    ENABLE_PROCESSED_INPUT, ENABLE_QUICK_EDIT_MODE, FOREGROUND_BLUE, FOREGROUND_GREEN,
    FOREGROUND_RED,
};
use super::{
    CharInfo, ConsoleApi, RawCoord, RawCursorInfo, RawInputRecord, RawScreenBufferInfo, SmallRect,
};

/// `ERROR_INVALID_HANDLE`.
const ERROR_INVALID_HANDLE: i32 = 6;
/// `ERROR_INVALID_PARAMETER`.
const ERROR_INVALID_PARAMETER: i32 = 87;

const DEFAULT_ATTRIBUTES: u16 = FOREGROUND_RED | FOREGROUND_GREEN | FOREGROUND_BLUE;
const DEFAULT_MODE: u32 = ENABLE_PROCESSED_INPUT
    | ENABLE_LINE_INPUT
    | ENABLE_ECHO_INPUT
    | ENABLE_INSERT_MODE
    | ENABLE_QUICK_EDIT_MODE
    | ENABLE_EXTENDED_FLAGS;

#[derive(Debug)]
struct State {
    size: RawCoord,
    cells: Vec<CharInfo>,
    window: SmallRect,
    maximum_window_size: RawCoord,
    cursor: RawCoord,
    attributes: u16,
    mode: u32,
    cursor_info: RawCursorInfo,
    input: VecDeque<RawInputRecord>,
    input_code_page: u32,
    output_code_page: u32,
    detached: bool,
}

impl State {
    fn blank(&self) -> CharInfo {
        CharInfo {
            ch: u16::from(b' '),
            attributes: self.attributes,
        }
    }

    fn in_buffer(&self, pos: RawCoord) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.x && pos.y < self.size.y
    }

    fn index(&self, pos: RawCoord) -> usize {
        // Callers check `in_buffer` first, so both components are non-negative.
        usize::try_from(pos.y).unwrap_or(0) * usize::try_from(self.size.x).unwrap_or(0)
            + usize::try_from(pos.x).unwrap_or(0)
    }

    fn check(&self) -> io::Result<()> {
        if self.detached {
            return Err(io::Error::from_raw_os_error(ERROR_INVALID_HANDLE));
        }
        Ok(())
    }
}

fn invalid_parameter() -> io::Error {
    io::Error::from_raw_os_error(ERROR_INVALID_PARAMETER)
}

fn cell_count(size: RawCoord) -> usize {
    usize::try_from(size.x).unwrap_or(0) * usize::try_from(size.y).unwrap_or(0)
}

/// A console simulated in memory.
#[derive(Debug)]
pub struct MemoryConsole {
    state: Mutex<State>,
}

impl MemoryConsole {
    /// Creates a console whose buffer is `buffer` and whose visible window is `window`.
    #[must_use]
    pub fn new(buffer: RawCoord, window: SmallRect) -> Self {
        let blank = CharInfo {
            ch: u16::from(b' '),
            attributes: DEFAULT_ATTRIBUTES,
        };
        Self {
            state: Mutex::new(State {
                size: buffer,
                cells: vec![blank; cell_count(buffer)],
                window,
                maximum_window_size: buffer,
                cursor: RawCoord::new(window.left, window.top),
                attributes: DEFAULT_ATTRIBUTES,
                mode: DEFAULT_MODE,
                cursor_info: RawCursorInfo {
                    size: 25,
                    visible: true,
                },
                input: VecDeque::new(),
                input_code_page: 437,
                output_code_page: 437,
                detached: false,
            }),
        }
    }

    /// Creates a console whose window shows the whole `rows` × `columns` buffer.
    #[must_use]
    pub fn with_size(rows: i16, columns: i16) -> Self {
        Self::new(
            RawCoord::new(columns, rows),
            SmallRect::new(0, 0, columns - 1, rows - 1),
        )
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues an input record for a later read.
    pub fn push_input(&self, record: RawInputRecord) {
        self.lock().input.push_back(record);
    }

    /// Queues several input records, in order.
    pub fn push_inputs(&self, records: impl IntoIterator<Item = RawInputRecord>) {
        self.lock().input.extend(records);
    }

    /// Number of queued, unread input records.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.lock().input.len()
    }

    /// Makes every later call fail with `ERROR_INVALID_HANDLE`.
    pub fn detach(&self) {
        self.lock().detached = true;
    }

    /// Returns the cell at an absolute buffer position.
    #[must_use]
    pub fn cell(&self, row: i16, column: i16) -> Option<CharInfo> {
        let state = self.lock();
        let pos = RawCoord::new(column, row);
        state.in_buffer(pos).then(|| state.cells[state.index(pos)])
    }

    /// Returns the characters of one buffer row.
    #[must_use]
    pub fn row_text(&self, row: i16) -> String {
        let state = self.lock();
        if row < 0 || row >= state.size.y {
            return String::new();
        }
        let start = state.index(RawCoord::new(0, row));
        let end = start + usize::try_from(state.size.x).unwrap_or(0);
        char::decode_utf16(state.cells[start..end].iter().map(|c| c.ch))
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Current absolute cursor position.
    #[must_use]
    pub fn cursor(&self) -> RawCoord {
        self.lock().cursor
    }

    /// Current raw mode word.
    #[must_use]
    pub fn raw_mode(&self) -> u32 {
        self.lock().mode
    }
}

impl ConsoleApi for MemoryConsole {
    fn screen_buffer_info(&self) -> io::Result<RawScreenBufferInfo> {
        let state = self.lock();
        state.check()?;
        Ok(RawScreenBufferInfo {
            size: state.size,
            cursor_position: state.cursor,
            attributes: state.attributes,
            window: state.window,
            maximum_window_size: state.maximum_window_size,
        })
    }

    fn set_window_info(&self, window: SmallRect) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        let fits = window.left >= 0
            && window.top >= 0
            && window.left <= window.right
            && window.top <= window.bottom
            && window.right < state.size.x
            && window.bottom < state.size.y;
        if !fits {
            return Err(invalid_parameter());
        }
        state.window = window;
        Ok(())
    }

    fn set_buffer_size(&self, size: RawCoord) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        if size.x <= state.window.right || size.y <= state.window.bottom {
            return Err(invalid_parameter());
        }
        let blank = state.blank();
        let mut cells = vec![blank; cell_count(size)];
        let copy_rows = size.y.min(state.size.y);
        let copy_columns = usize::try_from(size.x.min(state.size.x)).unwrap_or(0);
        for row in 0..copy_rows {
            let from = state.index(RawCoord::new(0, row));
            let to = usize::try_from(row).unwrap_or(0) * usize::try_from(size.x).unwrap_or(0);
            cells[to..to + copy_columns].copy_from_slice(&state.cells[from..from + copy_columns]);
        }
        state.cells = cells;
        state.size = size;
        state.maximum_window_size = size;
        Ok(())
    }

    fn mode(&self) -> io::Result<u32> {
        let state = self.lock();
        state.check()?;
        Ok(state.mode)
    }

    fn set_mode(&self, mode: u32) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        state.mode = mode;
        Ok(())
    }

    fn set_text_attribute(&self, attributes: u16) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        state.attributes = attributes;
        Ok(())
    }

    fn cursor_info(&self) -> io::Result<RawCursorInfo> {
        let state = self.lock();
        state.check()?;
        Ok(state.cursor_info)
    }

    fn set_cursor_info(&self, info: RawCursorInfo) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        if info.size == 0 || info.size > 100 {
            return Err(invalid_parameter());
        }
        state.cursor_info = info;
        Ok(())
    }

    fn set_cursor_position(&self, position: RawCoord) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        if !state.in_buffer(position) {
            return Err(invalid_parameter());
        }
        state.cursor = position;
        Ok(())
    }

    fn read_input(&self) -> io::Result<RawInputRecord> {
        let mut state = self.lock();
        state.check()?;
        state.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "console input queue exhausted")
        })
    }

    fn write_output(
        &self,
        buffer: &[CharInfo],
        size: RawCoord,
        origin: RawCoord,
        region: SmallRect,
    ) -> io::Result<SmallRect> {
        let mut state = self.lock();
        state.check()?;
        if size.x < 0 || size.y < 0 || buffer.len() < cell_count(size) {
            return Err(invalid_parameter());
        }
        if origin.x < 0 || origin.y < 0 || origin.x >= size.x || origin.y >= size.y {
            return Err(invalid_parameter());
        }

        // Clip to the screen buffer, then to what the source block can supply.
        let mut written = SmallRect::new(
            region.left.max(0),
            region.top.max(0),
            region.right.min(state.size.x - 1),
            region.bottom.min(state.size.y - 1),
        );
        written.right = written.right.min(written.left + (size.x - origin.x) - 1);
        written.bottom = written.bottom.min(written.top + (size.y - origin.y) - 1);

        let source_columns = usize::try_from(size.x).unwrap_or(0);
        for row in written.top..=written.bottom {
            for column in written.left..=written.right {
                let src_row = usize::try_from(origin.y + (row - written.top)).unwrap_or(0);
                let src_column = usize::try_from(origin.x + (column - written.left)).unwrap_or(0);
                let dst = state.index(RawCoord::new(column, row));
                state.cells[dst] = buffer[src_row * source_columns + src_column];
            }
        }
        Ok(written)
    }

    fn fill_output_character(&self, ch: u16, count: u32, at: RawCoord) -> io::Result<u32> {
        let mut state = self.lock();
        state.check()?;
        if !state.in_buffer(at) {
            return Err(invalid_parameter());
        }
        let start = state.index(at);
        let available = state.cells.len() - start;
        let written = available.min(usize::try_from(count).unwrap_or(usize::MAX));
        for cell in &mut state.cells[start..start + written] {
            cell.ch = ch;
        }
        Ok(u32::try_from(written).unwrap_or(u32::MAX))
    }

    fn scroll(
        &self,
        scroll: SmallRect,
        clip: SmallRect,
        destination: RawCoord,
        fill: CharInfo,
    ) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        let clip = SmallRect::new(
            clip.left.max(0),
            clip.top.max(0),
            clip.right.min(state.size.x - 1),
            clip.bottom.min(state.size.y - 1),
        );
        let source = SmallRect::new(
            scroll.left.max(0),
            scroll.top.max(0),
            scroll.right.min(state.size.x - 1),
            scroll.bottom.min(state.size.y - 1),
        );
        if source.left > source.right || source.top > source.bottom {
            return Err(invalid_parameter());
        }
        let inside_clip = |pos: RawCoord| {
            pos.x >= clip.left && pos.x <= clip.right && pos.y >= clip.top && pos.y <= clip.bottom
        };

        let mut moved = Vec::new();
        for row in source.top..=source.bottom {
            for column in source.left..=source.right {
                let pos = RawCoord::new(column, row);
                let idx = state.index(pos);
                moved.push((row - source.top, column - source.left, state.cells[idx]));
                if inside_clip(pos) {
                    state.cells[idx] = fill;
                }
            }
        }
        for (dy, dx, cell) in moved {
            let target = RawCoord::new(destination.x + dx, destination.y + dy);
            if inside_clip(target) && state.in_buffer(target) {
                let idx = state.index(target);
                state.cells[idx] = cell;
            }
        }
        Ok(())
    }

    fn ansi_code_page(&self) -> u32 {
        1252
    }

    fn input_code_page(&self) -> u32 {
        self.lock().input_code_page
    }

    fn set_input_code_page(&self, code_page: u32) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        if code_page == 0 {
            return Err(invalid_parameter());
        }
        state.input_code_page = code_page;
        Ok(())
    }

    fn output_code_page(&self) -> u32 {
        self.lock().output_code_page
    }

    fn set_output_code_page(&self, code_page: u32) -> io::Result<()> {
        let mut state = self.lock();
        state.check()?;
        if code_page == 0 {
            return Err(invalid_parameter());
        }
        state.output_code_page = code_page;
        Ok(())
    }
}
