//! Domain primitive types used across the termbridge workspace.
//!
//! Everything here is a value type. Backends translate these to and from
//! their platform representation on every call; nothing is cached.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COLOR_ATTR, MAX_CURSOR_SIZE};
use crate::error::{Result, TermError};

/// Dimensions of the visible terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalSize {
    /// Number of text rows.
    pub rows: u16,
    /// Number of text columns.
    pub columns: u16,
}

impl TerminalSize {
    /// Creates a size from a row and column count.
    #[must_use]
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }
}

impl fmt::Display for TerminalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// A cell position.
///
/// Zero-based unless the function taking it documents a one-based convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index.
    pub row: u16,
    /// Column index.
    pub column: u16,
}

impl Coordinate {
    /// Creates a coordinate from a row and column.
    #[must_use]
    pub const fn new(row: u16, column: u16) -> Self {
        Self { row, column }
    }
}

/// A rectangle of cells with exclusive `bottom` and `right` edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// First row inside the rectangle.
    pub top: u16,
    /// First column inside the rectangle.
    pub left: u16,
    /// First row below the rectangle.
    pub bottom: u16,
    /// First column right of the rectangle.
    pub right: u16,
}

impl Rect {
    /// Creates a rectangle from its edges.
    #[must_use]
    pub const fn new(top: u16, left: u16, bottom: u16, right: u16) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.right.saturating_sub(self.left)
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.bottom.saturating_sub(self.top)
    }

    /// Returns whether the rectangle covers no cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns whether `pos` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, pos: Coordinate) -> bool {
        pos.row >= self.top && pos.row < self.bottom && pos.column >= self.left && pos.column < self.right
    }
}

/// Modifier keys held during an input event.
///
/// Left and right variants are merged.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierState {
    /// Either control key.
    pub control: bool,
    /// Either alt key.
    pub alt: bool,
    /// Shift.
    pub shift: bool,
}

/// Named keys, in their fixed table order.
///
/// The discriminant is the table index and may travel inside event tags,
/// so variants must never be reordered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    /// Return / enter.
    Enter = 0,
    /// Escape.
    Escape = 1,
    /// Tab.
    Tab = 2,
    /// Arrow up.
    Up = 3,
    /// Arrow down.
    Down = 4,
    /// Arrow left.
    Left = 5,
    /// Arrow right.
    Right = 6,
    /// F1.
    F1 = 7,
    /// F2.
    F2 = 8,
    /// F3.
    F3 = 9,
    /// F4.
    F4 = 10,
    /// F5.
    F5 = 11,
    /// F6.
    F6 = 12,
    /// F7.
    F7 = 13,
    /// F8.
    F8 = 14,
    /// F9.
    F9 = 15,
    /// F10.
    F10 = 16,
    /// F11.
    F11 = 17,
    /// F12.
    F12 = 18,
    /// Page down.
    PageDown = 19,
    /// Page up.
    PageUp = 20,
    /// Home.
    Home = 21,
    /// End.
    End = 22,
    /// Insert.
    Insert = 23,
    /// Delete.
    Delete = 24,
    /// Backspace.
    Backspace = 25,
}

impl NamedKey {
    /// Every named key, indexed by [`NamedKey::index`].
    pub const ALL: [Self; 26] = [
        Self::Enter,
        Self::Escape,
        Self::Tab,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::PageDown,
        Self::PageUp,
        Self::Home,
        Self::End,
        Self::Insert,
        Self::Delete,
        Self::Backspace,
    ];

    /// Position of this key in the fixed table.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Looks a key up by its table position.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Key identity carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key from the named table.
    Named(NamedKey),
    /// A key that produced a character.
    Char(char),
}

/// Mouse button reported by a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Leftmost button.
    Button1,
    /// Second button from the left.
    Button2,
    /// Third button from the left.
    Button3,
    /// Fourth button from the left.
    Button4,
    /// Release, or a button outside the four above.
    None,
}

impl MouseButton {
    /// Position of the button in decode priority order.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Button1 => 0,
            Self::Button2 => 1,
            Self::Button3 => 2,
            Self::Button4 => 3,
            Self::None => 4,
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// Modifiers held at the time.
        modifiers: ModifierState,
        /// The key.
        code: KeyCode,
    },
    /// A mouse button changed state.
    Mouse {
        /// Modifiers held at the time.
        modifiers: ModifierState,
        /// Highest-priority pressed button.
        button: MouseButton,
        /// Absolute buffer row.
        row: u16,
        /// Absolute buffer column.
        column: u16,
    },
    /// The terminal was resized; query the size again.
    Resize,
}

/// A 4-bit color: bit0 red, bit1 green, bit2 blue, bit3 intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorAttr(u8);

impl ColorAttr {
    /// Black.
    pub const BLACK: Self = Self(0);
    /// Red.
    pub const RED: Self = Self(1);
    /// Green.
    pub const GREEN: Self = Self(2);
    /// Yellow.
    pub const YELLOW: Self = Self(3);
    /// Blue.
    pub const BLUE: Self = Self(4);
    /// Magenta.
    pub const MAGENTA: Self = Self(5);
    /// Cyan.
    pub const CYAN: Self = Self(6);
    /// White.
    pub const WHITE: Self = Self(7);
    /// Intensity bit alone.
    pub const INTENSITY: u8 = 0x08;

    /// Creates a color from its packed nibble.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` if `value` does not fit in 4 bits.
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_COLOR_ATTR {
            return Err(TermError::invalid(format!(
                "color attribute {value} exceeds {MAX_COLOR_ATTR}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the packed nibble.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns this color with the intensity bit set.
    #[must_use]
    pub const fn bright(self) -> Self {
        Self(self.0 | Self::INTENSITY)
    }

    /// Red component.
    #[must_use]
    pub const fn red(self) -> bool {
        self.0 & 0x01 != 0
    }

    /// Green component.
    #[must_use]
    pub const fn green(self) -> bool {
        self.0 & 0x02 != 0
    }

    /// Blue component.
    #[must_use]
    pub const fn blue(self) -> bool {
        self.0 & 0x04 != 0
    }

    /// Intensity bit.
    #[must_use]
    pub const fn intense(self) -> bool {
        self.0 & Self::INTENSITY != 0
    }
}

impl TryFrom<u8> for ColorAttr {
    type Error = TermError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ColorAttr> for u8 {
    fn from(color: ColorAttr) -> Self {
        color.0
    }
}

/// One character cell of an output block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Character shown in the cell.
    pub codepoint: char,
    /// Text color.
    pub foreground: ColorAttr,
    /// Cell background.
    pub background: ColorAttr,
}

impl Cell {
    /// Creates a cell.
    #[must_use]
    pub const fn new(codepoint: char, foreground: ColorAttr, background: ColorAttr) -> Self {
        Self {
            codepoint,
            foreground,
            background,
        }
    }

    /// A space in white on black.
    #[must_use]
    pub const fn blank() -> Self {
        Self::new(' ', ColorAttr::WHITE, ColorAttr::BLACK)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// Console input mode, read and written as a whole.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsoleModeFlags {
    /// Typed characters are echoed.
    pub echo_input: bool,
    /// Typed text is inserted rather than overwriting.
    pub insert_mode: bool,
    /// Reads return only after a full line.
    pub line_input: bool,
    /// Mouse events are reported.
    pub mouse_input: bool,
    /// Control keys are processed by the system.
    pub processed_input: bool,
    /// The mouse selects text instead of producing events.
    pub quick_edit_mode: bool,
    /// Buffer size changes are reported.
    pub window_input: bool,
}

impl ConsoleModeFlags {
    /// The mode a console normally starts in.
    #[must_use]
    pub const fn cooked() -> Self {
        Self {
            echo_input: true,
            insert_mode: true,
            line_input: true,
            mouse_input: false,
            processed_input: true,
            quick_edit_mode: true,
            window_input: false,
        }
    }

    /// Raw key, mouse and resize reporting for full-screen programs.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            echo_input: false,
            insert_mode: false,
            line_input: false,
            mouse_input: true,
            processed_input: false,
            quick_edit_mode: false,
            window_input: true,
        }
    }
}

/// Shape and visibility of the text cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorInfo {
    /// Percentage of the cell filled by the cursor, 1 to 100.
    pub size: u8,
    /// Whether the cursor is shown.
    pub visible: bool,
}

impl CursorInfo {
    /// Creates cursor info, checking the size range.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` if `size` is not within 1..=100.
    pub fn new(size: u8, visible: bool) -> Result<Self> {
        if size == 0 || size > MAX_CURSOR_SIZE {
            return Err(TermError::invalid(format!(
                "cursor size {size} outside 1..={MAX_CURSOR_SIZE}"
            )));
        }
        Ok(Self { size, visible })
    }
}

/// Snapshot of a console screen buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenBufferInfo {
    /// Full logical buffer, including scrollback.
    pub buffer_size: TerminalSize,
    /// Absolute cursor position.
    pub cursor: Coordinate,
    /// Current text color.
    pub foreground: ColorAttr,
    /// Current background color.
    pub background: ColorAttr,
    /// Visible window inside the buffer.
    pub window: Rect,
    /// Largest window the console could show.
    pub maximum_window_size: TerminalSize,
}
