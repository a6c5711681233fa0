//! Bit-level translation between domain values and console words.

use termbridge_common::types::{ColorAttr, ConsoleModeFlags};

use super::consts::{
    BACKGROUND_BLUE, BACKGROUND_GREEN, BACKGROUND_INTENSITY, BACKGROUND_RED, ENABLE_ECHO_INPUT,
    ENABLE_EXTENDED_FLAGS, ENABLE_INSERT_MODE, ENABLE_LINE_INPUT, ENABLE_MOUSE_INPUT,
    ENABLE_PROCESSED_INPUT, ENABLE_QUICK_EDIT_MODE, ENABLE_WINDOW_INPUT, FOREGROUND_BLUE,
    FOREGROUND_GREEN, FOREGROUND_INTENSITY, FOREGROUND_RED,
};

/// Color nibble bit → (foreground bit, background bit).
const COLOR_BITS: [(u8, u16, u16); 4] = [
    (0x01, FOREGROUND_RED, BACKGROUND_RED),
    (0x02, FOREGROUND_GREEN, BACKGROUND_GREEN),
    (0x04, FOREGROUND_BLUE, BACKGROUND_BLUE),
    (0x08, FOREGROUND_INTENSITY, BACKGROUND_INTENSITY),
];

const MODE_BITS: [u32; 7] = [
    ENABLE_ECHO_INPUT,
    ENABLE_INSERT_MODE,
    ENABLE_LINE_INPUT,
    ENABLE_MOUSE_INPUT,
    ENABLE_PROCESSED_INPUT,
    ENABLE_QUICK_EDIT_MODE,
    ENABLE_WINDOW_INPUT,
];

/// Packs a foreground and background color into an attribute word.
#[must_use]
pub fn pack_colors(foreground: ColorAttr, background: ColorAttr) -> u16 {
    let mut word = 0;
    for &(bit, fg, bg) in &COLOR_BITS {
        if foreground.bits() & bit != 0 {
            word |= fg;
        }
        if background.bits() & bit != 0 {
            word |= bg;
        }
    }
    word
}

/// Extracts the foreground and background colors of an attribute word.
///
/// Bits above the background nibble (underline, grid lines) are ignored.
#[must_use]
pub fn unpack_colors(attributes: u16) -> (ColorAttr, ColorAttr) {
    let mut fg = 0;
    let mut bg = 0;
    for &(bit, fg_bit, bg_bit) in &COLOR_BITS {
        if attributes & fg_bit != 0 {
            fg |= bit;
        }
        if attributes & bg_bit != 0 {
            bg |= bit;
        }
    }
    // Both nibbles are assembled from the four bits above.
    (
        ColorAttr::new(fg).unwrap_or_default(),
        ColorAttr::new(bg).unwrap_or_default(),
    )
}

fn mode_fields(flags: &ConsoleModeFlags) -> [bool; 7] {
    [
        flags.echo_input,
        flags.insert_mode,
        flags.line_input,
        flags.mouse_input,
        flags.processed_input,
        flags.quick_edit_mode,
        flags.window_input,
    ]
}

/// Builds the mode word written by `SetConsoleMode`.
///
/// `ENABLE_EXTENDED_FLAGS` is always set so insert and quick-edit changes apply.
#[must_use]
pub fn pack_mode(flags: &ConsoleModeFlags) -> u32 {
    mode_fields(flags)
        .iter()
        .zip(MODE_BITS)
        .filter(|(on, _)| **on)
        .fold(ENABLE_EXTENDED_FLAGS, |mode, (_, bit)| mode | bit)
}

/// Reads the seven mode flags out of a `GetConsoleMode` word.
#[must_use]
pub const fn unpack_mode(mode: u32) -> ConsoleModeFlags {
    ConsoleModeFlags {
        echo_input: mode & ENABLE_ECHO_INPUT != 0,
        insert_mode: mode & ENABLE_INSERT_MODE != 0,
        line_input: mode & ENABLE_LINE_INPUT != 0,
        mouse_input: mode & ENABLE_MOUSE_INPUT != 0,
        processed_input: mode & ENABLE_PROCESSED_INPUT != 0,
        quick_edit_mode: mode & ENABLE_QUICK_EDIT_MODE != 0,
        window_input: mode & ENABLE_WINDOW_INPUT != 0,
    }
}
