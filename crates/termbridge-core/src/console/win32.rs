//! [`ConsoleApi`] over a real Windows console handle.

use std::io;
use std::mem;

use winapi::shared::minwindef::{BOOL, DWORD, TRUE};
use winapi::um::consoleapi::{
    GetConsoleCP, GetConsoleMode, GetConsoleOutputCP, ReadConsoleInputW, SetConsoleMode,
};
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::processenv::GetStdHandle;
use winapi::um::winbase::{STD_INPUT_HANDLE, STD_OUTPUT_HANDLE};
use winapi::um::wincon::{
    CONSOLE_CURSOR_INFO, CONSOLE_SCREEN_BUFFER_INFO, FillConsoleOutputCharacterW,
    GetConsoleCursorInfo, GetConsoleScreenBufferInfo, ScrollConsoleScreenBufferW, SetConsoleCP,
    SetConsoleCursorInfo, SetConsoleCursorPosition, SetConsoleOutputCP,
    SetConsoleScreenBufferSize, SetConsoleTextAttribute, SetConsoleWindowInfo,
    WriteConsoleOutputW,
};
use winapi::um::wincontypes::{CHAR_INFO, COORD, INPUT_RECORD, SMALL_RECT};
use winapi::um::winnls::GetACP;
use winapi::um::winnt::HANDLE;

use super::consts::{FOCUS_EVENT, KEY_EVENT, MENU_EVENT, MOUSE_EVENT, WINDOW_BUFFER_SIZE_EVENT};
use super::{
    CharInfo, ConsoleApi, KeyRecord, MouseRecord, RawCoord, RawCursorInfo, RawInputRecord,
    RawScreenBufferInfo, SmallRect,
};
use crate::backend::Stream;

/// A console handle owned by the caller.
#[derive(Debug)]
pub struct Win32Console {
    handle: HANDLE,
}

// SAFETY: console handles are process-wide kernel object references; every
// console function accepts them from any thread.
unsafe impl Send for Win32Console {}
// SAFETY: see above; this type holds no state besides the handle value.
unsafe impl Sync for Win32Console {}

impl Win32Console {
    /// Wraps a console handle. The handle is never closed by this type.
    #[must_use]
    pub const fn from_raw_handle(handle: HANDLE) -> Self {
        Self { handle }
    }

    /// Returns the process's standard input or output console.
    ///
    /// # Errors
    ///
    /// Returns an error if `GetStdHandle` fails or the process has no console.
    pub fn std_handle(stream: Stream) -> io::Result<Self> {
        let which = match stream {
            Stream::Input => STD_INPUT_HANDLE,
            Stream::Output => STD_OUTPUT_HANDLE,
        };
        // SAFETY: GetStdHandle has no preconditions.
        let handle = unsafe { GetStdHandle(which) };
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        if handle.is_null() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "process has no attached console",
            ));
        }
        Ok(Self { handle })
    }
}

fn check(ok: BOOL) -> io::Result<()> {
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

const fn to_coord(c: RawCoord) -> COORD {
    COORD { X: c.x, Y: c.y }
}

const fn from_coord(c: COORD) -> RawCoord {
    RawCoord::new(c.X, c.Y)
}

const fn to_rect(r: SmallRect) -> SMALL_RECT {
    SMALL_RECT {
        Left: r.left,
        Top: r.top,
        Right: r.right,
        Bottom: r.bottom,
    }
}

const fn from_rect(r: SMALL_RECT) -> SmallRect {
    SmallRect::new(r.Left, r.Top, r.Right, r.Bottom)
}

fn to_char_info(cell: CharInfo) -> CHAR_INFO {
    // SAFETY: CHAR_INFO is plain data; all-zero is a valid value.
    let mut out: CHAR_INFO = unsafe { mem::zeroed() };
    // SAFETY: writing the UTF-16 arm of the character union.
    unsafe {
        *out.Char.UnicodeChar_mut() = cell.ch;
    }
    out.Attributes = cell.attributes;
    out
}

fn from_input_record(record: &INPUT_RECORD) -> Option<RawInputRecord> {
    // SAFETY: each union arm is read only under its matching EventType tag.
    unsafe {
        match record.EventType {
            KEY_EVENT => {
                let key = record.Event.KeyEvent();
                Some(RawInputRecord::Key(KeyRecord {
                    key_down: key.bKeyDown != 0,
                    repeat_count: key.wRepeatCount,
                    virtual_key_code: key.wVirtualKeyCode,
                    virtual_scan_code: key.wVirtualScanCode,
                    unicode_char: *key.uChar.UnicodeChar(),
                    control_key_state: key.dwControlKeyState,
                }))
            }
            MOUSE_EVENT => {
                let mouse = record.Event.MouseEvent();
                Some(RawInputRecord::Mouse(MouseRecord {
                    position: from_coord(mouse.dwMousePosition),
                    button_state: mouse.dwButtonState,
                    control_key_state: mouse.dwControlKeyState,
                    event_flags: mouse.dwEventFlags,
                }))
            }
            WINDOW_BUFFER_SIZE_EVENT => Some(RawInputRecord::WindowBufferSize(from_coord(
                record.Event.WindowBufferSizeEvent().dwSize,
            ))),
            MENU_EVENT => Some(RawInputRecord::Menu(record.Event.MenuEvent().dwCommandId)),
            FOCUS_EVENT => Some(RawInputRecord::Focus(
                record.Event.FocusEvent().bSetFocus != 0,
            )),
            _ => None,
        }
    }
}

impl ConsoleApi for Win32Console {
    fn screen_buffer_info(&self) -> io::Result<RawScreenBufferInfo> {
        // SAFETY: plain-data out parameter.
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { mem::zeroed() };
        // SAFETY: `info` is a valid, writable CONSOLE_SCREEN_BUFFER_INFO.
        check(unsafe { GetConsoleScreenBufferInfo(self.handle, &mut info) })?;
        Ok(RawScreenBufferInfo {
            size: from_coord(info.dwSize),
            cursor_position: from_coord(info.dwCursorPosition),
            attributes: info.wAttributes,
            window: from_rect(info.srWindow),
            maximum_window_size: from_coord(info.dwMaximumWindowSize),
        })
    }

    fn set_window_info(&self, window: SmallRect) -> io::Result<()> {
        let rect = to_rect(window);
        // SAFETY: `rect` outlives the call; TRUE selects absolute coordinates.
        check(unsafe { SetConsoleWindowInfo(self.handle, TRUE, &rect) })
    }

    fn set_buffer_size(&self, size: RawCoord) -> io::Result<()> {
        // SAFETY: COORD is passed by value.
        check(unsafe { SetConsoleScreenBufferSize(self.handle, to_coord(size)) })
    }

    fn mode(&self) -> io::Result<u32> {
        let mut mode: DWORD = 0;
        // SAFETY: `mode` is a valid out parameter.
        check(unsafe { GetConsoleMode(self.handle, &mut mode) })?;
        Ok(mode)
    }

    fn set_mode(&self, mode: u32) -> io::Result<()> {
        // SAFETY: mode is passed by value.
        check(unsafe { SetConsoleMode(self.handle, mode) })
    }

    fn set_text_attribute(&self, attributes: u16) -> io::Result<()> {
        // SAFETY: attribute word is passed by value.
        check(unsafe { SetConsoleTextAttribute(self.handle, attributes) })
    }

    fn cursor_info(&self) -> io::Result<RawCursorInfo> {
        let mut info = CONSOLE_CURSOR_INFO {
            dwSize: 0,
            bVisible: 0,
        };
        // SAFETY: `info` is a valid out parameter.
        check(unsafe { GetConsoleCursorInfo(self.handle, &mut info) })?;
        Ok(RawCursorInfo {
            size: info.dwSize,
            visible: info.bVisible != 0,
        })
    }

    fn set_cursor_info(&self, info: RawCursorInfo) -> io::Result<()> {
        let raw = CONSOLE_CURSOR_INFO {
            dwSize: info.size,
            bVisible: BOOL::from(info.visible),
        };
        // SAFETY: `raw` outlives the call.
        check(unsafe { SetConsoleCursorInfo(self.handle, &raw) })
    }

    fn set_cursor_position(&self, position: RawCoord) -> io::Result<()> {
        // SAFETY: COORD is passed by value.
        check(unsafe { SetConsoleCursorPosition(self.handle, to_coord(position)) })
    }

    fn read_input(&self) -> io::Result<RawInputRecord> {
        loop {
            // SAFETY: plain-data out parameter.
            let mut record: INPUT_RECORD = unsafe { mem::zeroed() };
            let mut read: DWORD = 0;
            // SAFETY: room for exactly one record; `read` receives the count.
            check(unsafe { ReadConsoleInputW(self.handle, &mut record, 1, &mut read) })?;
            if read == 1 {
                if let Some(decoded) = from_input_record(&record) {
                    return Ok(decoded);
                }
            }
        }
    }

    fn write_output(
        &self,
        buffer: &[CharInfo],
        size: RawCoord,
        origin: RawCoord,
        region: SmallRect,
    ) -> io::Result<SmallRect> {
        let raw: Vec<CHAR_INFO> = buffer.iter().copied().map(to_char_info).collect();
        let mut rect = to_rect(region);
        // SAFETY: `raw` holds `size.x * size.y` cells as checked by the caller;
        // `rect` is updated in place with the region actually written.
        check(unsafe {
            WriteConsoleOutputW(
                self.handle,
                raw.as_ptr(),
                to_coord(size),
                to_coord(origin),
                &mut rect,
            )
        })?;
        Ok(from_rect(rect))
    }

    fn fill_output_character(&self, ch: u16, count: u32, at: RawCoord) -> io::Result<u32> {
        let mut written: DWORD = 0;
        // SAFETY: `written` is a valid out parameter.
        check(unsafe {
            FillConsoleOutputCharacterW(self.handle, ch, count, to_coord(at), &mut written)
        })?;
        Ok(written)
    }

    fn scroll(
        &self,
        scroll: SmallRect,
        clip: SmallRect,
        destination: RawCoord,
        fill: CharInfo,
    ) -> io::Result<()> {
        let scroll = to_rect(scroll);
        let clip = to_rect(clip);
        let fill = to_char_info(fill);
        // SAFETY: every pointer refers to a local that outlives the call.
        check(unsafe {
            ScrollConsoleScreenBufferW(self.handle, &scroll, &clip, to_coord(destination), &fill)
        })
    }

    fn ansi_code_page(&self) -> u32 {
        // SAFETY: no preconditions.
        unsafe { GetACP() }
    }

    fn input_code_page(&self) -> u32 {
        // SAFETY: no preconditions.
        unsafe { GetConsoleCP() }
    }

    fn set_input_code_page(&self, code_page: u32) -> io::Result<()> {
        // SAFETY: code page is passed by value.
        check(unsafe { SetConsoleCP(code_page) })
    }

    fn output_code_page(&self) -> u32 {
        // SAFETY: no preconditions.
        unsafe { GetConsoleOutputCP() }
    }

    fn set_output_code_page(&self, code_page: u32) -> io::Result<()> {
        // SAFETY: code page is passed by value.
        check(unsafe { SetConsoleOutputCP(code_page) })
    }
}
