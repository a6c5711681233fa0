//! Win32 console constants, by their documented values.
//!
//! Plain numeric values, available on every target.

// INPUT_RECORD.EventType
/// `KEY_EVENT`.
pub const KEY_EVENT: u16 = 0x0001;
/// `MOUSE_EVENT`.
pub const MOUSE_EVENT: u16 = 0x0002;
/// `WINDOW_BUFFER_SIZE_EVENT`.
pub const WINDOW_BUFFER_SIZE_EVENT: u16 = 0x0004;
/// `MENU_EVENT`.
pub const MENU_EVENT: u16 = 0x0008;
/// `FOCUS_EVENT`.
pub const FOCUS_EVENT: u16 = 0x0010;

// dwControlKeyState
/// `RIGHT_ALT_PRESSED`.
pub const RIGHT_ALT_PRESSED: u32 = 0x0001;
/// `LEFT_ALT_PRESSED`.
pub const LEFT_ALT_PRESSED: u32 = 0x0002;
/// `RIGHT_CTRL_PRESSED`.
pub const RIGHT_CTRL_PRESSED: u32 = 0x0004;
/// `LEFT_CTRL_PRESSED`.
pub const LEFT_CTRL_PRESSED: u32 = 0x0008;
/// `SHIFT_PRESSED`.
pub const SHIFT_PRESSED: u32 = 0x0010;

// dwButtonState
/// `FROM_LEFT_1ST_BUTTON_PRESSED`.
pub const FROM_LEFT_1ST_BUTTON_PRESSED: u32 = 0x0001;
/// `RIGHTMOST_BUTTON_PRESSED`.
pub const RIGHTMOST_BUTTON_PRESSED: u32 = 0x0002;
/// `FROM_LEFT_2ND_BUTTON_PRESSED`.
pub const FROM_LEFT_2ND_BUTTON_PRESSED: u32 = 0x0004;
/// `FROM_LEFT_3RD_BUTTON_PRESSED`.
pub const FROM_LEFT_3RD_BUTTON_PRESSED: u32 = 0x0008;
/// `FROM_LEFT_4TH_BUTTON_PRESSED`.
pub const FROM_LEFT_4TH_BUTTON_PRESSED: u32 = 0x0010;

// dwEventFlags
/// `MOUSE_MOVED`.
pub const MOUSE_MOVED: u32 = 0x0001;
/// `DOUBLE_CLICK`.
pub const DOUBLE_CLICK: u32 = 0x0002;
/// `MOUSE_WHEELED`.
pub const MOUSE_WHEELED: u32 = 0x0004;

// Virtual-key codes
/// `VK_BACK`.
pub const VK_BACK: u16 = 0x08;
/// `VK_TAB`.
pub const VK_TAB: u16 = 0x09;
/// `VK_RETURN`.
pub const VK_RETURN: u16 = 0x0D;
/// `VK_SHIFT`.
pub const VK_SHIFT: u16 = 0x10;
/// `VK_ESCAPE`.
pub const VK_ESCAPE: u16 = 0x1B;
/// `VK_PRIOR` (page up).
pub const VK_PRIOR: u16 = 0x21;
/// `VK_NEXT` (page down).
pub const VK_NEXT: u16 = 0x22;
/// `VK_END`.
pub const VK_END: u16 = 0x23;
/// `VK_HOME`.
pub const VK_HOME: u16 = 0x24;
/// `VK_LEFT`.
pub const VK_LEFT: u16 = 0x25;
/// `VK_UP`.
pub const VK_UP: u16 = 0x26;
/// `VK_RIGHT`.
pub const VK_RIGHT: u16 = 0x27;
/// `VK_DOWN`.
pub const VK_DOWN: u16 = 0x28;
/// `VK_INSERT`.
pub const VK_INSERT: u16 = 0x2D;
/// `VK_DELETE`.
pub const VK_DELETE: u16 = 0x2E;
/// `VK_F1`; F2 through F12 follow consecutively.
pub const VK_F1: u16 = 0x70;
/// `VK_F12`.
pub const VK_F12: u16 = 0x7B;

// Console input modes
/// `ENABLE_PROCESSED_INPUT`.
pub const ENABLE_PROCESSED_INPUT: u32 = 0x0001;
/// `ENABLE_LINE_INPUT`.
pub const ENABLE_LINE_INPUT: u32 = 0x0002;
/// `ENABLE_ECHO_INPUT`.
pub const ENABLE_ECHO_INPUT: u32 = 0x0004;
/// `ENABLE_WINDOW_INPUT`.
pub const ENABLE_WINDOW_INPUT: u32 = 0x0008;
/// `ENABLE_MOUSE_INPUT`.
pub const ENABLE_MOUSE_INPUT: u32 = 0x0010;
/// `ENABLE_INSERT_MODE`.
pub const ENABLE_INSERT_MODE: u32 = 0x0020;
/// `ENABLE_QUICK_EDIT_MODE`.
pub const ENABLE_QUICK_EDIT_MODE: u32 = 0x0040;
/// `ENABLE_EXTENDED_FLAGS`; required for insert and quick-edit changes to apply.
pub const ENABLE_EXTENDED_FLAGS: u32 = 0x0080;

// Character attributes
/// `FOREGROUND_BLUE`.
pub const FOREGROUND_BLUE: u16 = 0x0001;
/// `FOREGROUND_GREEN`.
pub const FOREGROUND_GREEN: u16 = 0x0002;
/// `FOREGROUND_RED`.
pub const FOREGROUND_RED: u16 = 0x0004;
/// `FOREGROUND_INTENSITY`.
pub const FOREGROUND_INTENSITY: u16 = 0x0008;
/// `BACKGROUND_BLUE`.
pub const BACKGROUND_BLUE: u16 = 0x0010;
/// `BACKGROUND_GREEN`.
pub const BACKGROUND_GREEN: u16 = 0x0020;
/// `BACKGROUND_RED`.
pub const BACKGROUND_RED: u16 = 0x0040;
/// `BACKGROUND_INTENSITY`.
pub const BACKGROUND_INTENSITY: u16 = 0x0080;
