//! Console input decoding.
//!
//! Raw console records are classified one at a time. Records the toolkit has
//! no use for (key releases, unmapped keys, pure pointer motion, menu and
//! focus notifications) are dropped inside the read loop, so a caller only
//! ever wakes up for a key press, a mouse button change, or a resize.

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::{InputEvent, KeyCode, ModifierState, MouseButton, NamedKey};

use crate::console::consts::{
    FROM_LEFT_1ST_BUTTON_PRESSED, FROM_LEFT_2ND_BUTTON_PRESSED, FROM_LEFT_3RD_BUTTON_PRESSED,
    FROM_LEFT_4TH_BUTTON_PRESSED, LEFT_ALT_PRESSED, LEFT_CTRL_PRESSED, MOUSE_MOVED,
    RIGHT_ALT_PRESSED, RIGHT_CTRL_PRESSED, SHIFT_PRESSED, VK_BACK, VK_DELETE, VK_DOWN, VK_END,
    VK_ESCAPE, VK_F1, VK_HOME, VK_INSERT, VK_LEFT, VK_NEXT, VK_PRIOR, VK_RETURN, VK_RIGHT,
    VK_TAB, VK_UP,
};
use crate::console::{ConsoleApi, KeyRecord, MouseRecord, RawInputRecord};

/// Virtual-key code → named key. Row `i` decodes to the key whose index is `i`.
pub const KEY_TABLE: [(u16, NamedKey); 26] = [
    (VK_RETURN, NamedKey::Enter),
    (VK_ESCAPE, NamedKey::Escape),
    (VK_TAB, NamedKey::Tab),
    (VK_UP, NamedKey::Up),
    (VK_DOWN, NamedKey::Down),
    (VK_LEFT, NamedKey::Left),
    (VK_RIGHT, NamedKey::Right),
    (VK_F1, NamedKey::F1),
    (VK_F1 + 1, NamedKey::F2),
    (VK_F1 + 2, NamedKey::F3),
    (VK_F1 + 3, NamedKey::F4),
    (VK_F1 + 4, NamedKey::F5),
    (VK_F1 + 5, NamedKey::F6),
    (VK_F1 + 6, NamedKey::F7),
    (VK_F1 + 7, NamedKey::F8),
    (VK_F1 + 8, NamedKey::F9),
    (VK_F1 + 9, NamedKey::F10),
    (VK_F1 + 10, NamedKey::F11),
    (VK_F1 + 11, NamedKey::F12),
    (VK_NEXT, NamedKey::PageDown),
    (VK_PRIOR, NamedKey::PageUp),
    (VK_HOME, NamedKey::Home),
    (VK_END, NamedKey::End),
    (VK_INSERT, NamedKey::Insert),
    (VK_DELETE, NamedKey::Delete),
    (VK_BACK, NamedKey::Backspace),
];

/// Button bit → button, highest priority first.
const BUTTON_PRIORITY: [(u32, MouseButton); 4] = [
    (FROM_LEFT_1ST_BUTTON_PRESSED, MouseButton::Button1),
    (FROM_LEFT_2ND_BUTTON_PRESSED, MouseButton::Button2),
    (FROM_LEFT_3RD_BUTTON_PRESSED, MouseButton::Button3),
    (FROM_LEFT_4TH_BUTTON_PRESSED, MouseButton::Button4),
];

/// Looks a virtual-key code up in [`KEY_TABLE`].
#[must_use]
pub fn named_key(virtual_key_code: u16) -> Option<NamedKey> {
    KEY_TABLE
        .iter()
        .find(|(code, _)| *code == virtual_key_code)
        .map(|&(_, key)| key)
}

/// Returns the virtual-key code that decodes to `key`.
#[must_use]
pub fn virtual_key_code(key: NamedKey) -> u16 {
    KEY_TABLE[usize::from(key.index())].0
}

/// Folds a control-key-state mask into modifier flags.
#[must_use]
pub const fn modifiers(control_key_state: u32) -> ModifierState {
    ModifierState {
        control: control_key_state & (LEFT_CTRL_PRESSED | RIGHT_CTRL_PRESSED) != 0,
        alt: control_key_state & (LEFT_ALT_PRESSED | RIGHT_ALT_PRESSED) != 0,
        shift: control_key_state & SHIFT_PRESSED != 0,
    }
}

/// Picks the highest-priority pressed button, or [`MouseButton::None`].
#[must_use]
pub fn pressed_button(button_state: u32) -> MouseButton {
    BUTTON_PRIORITY
        .iter()
        .find(|(bit, _)| button_state & bit != 0)
        .map_or(MouseButton::None, |&(_, button)| button)
}

fn decode_key(key: &KeyRecord) -> Option<InputEvent> {
    if !key.key_down {
        return None;
    }
    let code = if key.unicode_char == 0 {
        KeyCode::Named(named_key(key.virtual_key_code)?)
    } else {
        let ch = char::from_u32(u32::from(key.unicode_char)).unwrap_or(char::REPLACEMENT_CHARACTER);
        KeyCode::Char(ch)
    };
    Some(InputEvent::Key {
        modifiers: modifiers(key.control_key_state),
        code,
    })
}

fn decode_mouse(mouse: &MouseRecord) -> Option<InputEvent> {
    if mouse.event_flags & MOUSE_MOVED != 0 {
        return None;
    }
    Some(InputEvent::Mouse {
        modifiers: modifiers(mouse.control_key_state),
        button: pressed_button(mouse.button_state),
        row: u16::try_from(mouse.position.y).unwrap_or(0),
        column: u16::try_from(mouse.position.x).unwrap_or(0),
    })
}

/// Classifies one raw record. `None` means the record is dropped.
#[must_use]
pub fn decode(record: &RawInputRecord) -> Option<InputEvent> {
    match record {
        RawInputRecord::Key(key) => decode_key(key),
        RawInputRecord::Mouse(mouse) => decode_mouse(mouse),
        RawInputRecord::WindowBufferSize(_) => Some(InputEvent::Resize),
        RawInputRecord::Menu(_) | RawInputRecord::Focus(_) => None,
    }
}

/// Blocks until a record decodes to an event.
///
/// Records are consumed in the order the console produced them; dropped
/// records never reorder the ones that are kept.
///
/// # Errors
///
/// Returns `TermError::Device` if the console read itself fails. The handle
/// should be considered unusable afterwards.
pub fn read_event<A: ConsoleApi + ?Sized>(api: &A) -> Result<InputEvent> {
    loop {
        let record = api
            .read_input()
            .map_err(|e| TermError::device("ReadConsoleInput", e))?;
        if let Some(event) = decode(&record) {
            tracing::debug!(event = ?event, "console input decoded");
            return Ok(event);
        }
        tracing::trace!(record = ?record, "console input dropped");
    }
}
