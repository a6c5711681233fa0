//! Formatted output helpers for CLI commands.
//!
//! Turns input events and mode flags into the short human-readable lines
//! printed by `tbctl events` and `tbctl mode`.

use termbridge_common::types::{
    ConsoleModeFlags, InputEvent, KeyCode, ModifierState, MouseButton,
};

/// Formats held modifiers as a `ctrl+alt+shift+` prefix.
#[must_use]
pub fn format_modifiers(modifiers: ModifierState) -> String {
    let mut prefix = String::new();
    if modifiers.control {
        prefix.push_str("ctrl+");
    }
    if modifiers.alt {
        prefix.push_str("alt+");
    }
    if modifiers.shift {
        prefix.push_str("shift+");
    }
    prefix
}

/// One-line description of an input event (e.g., "key ctrl+'c'").
#[must_use]
pub fn describe_event(event: &InputEvent) -> String {
    match event {
        InputEvent::Key { modifiers, code } => {
            let key = match code {
                KeyCode::Char(c) => format!("{c:?}"),
                KeyCode::Named(named) => format!("{named:?}"),
            };
            format!("key {}{key}", format_modifiers(*modifiers))
        }
        InputEvent::Mouse {
            modifiers,
            button,
            row,
            column,
        } => {
            let button = match button {
                MouseButton::Button1 => "button1",
                MouseButton::Button2 => "button2",
                MouseButton::Button3 => "button3",
                MouseButton::Button4 => "button4",
                MouseButton::None => "release",
            };
            format!(
                "mouse {}{button} at {row},{column}",
                format_modifiers(*modifiers)
            )
        }
        InputEvent::Resize => "resize".to_string(),
    }
}

/// Flag names paired with their state, in display order.
#[must_use]
pub const fn mode_rows(mode: &ConsoleModeFlags) -> [(&'static str, bool); 7] {
    [
        ("echo_input", mode.echo_input),
        ("insert_mode", mode.insert_mode),
        ("line_input", mode.line_input),
        ("mouse_input", mode.mouse_input),
        ("processed_input", mode.processed_input),
        ("quick_edit_mode", mode.quick_edit_mode),
        ("window_input", mode.window_input),
    ]
}
