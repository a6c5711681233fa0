//! End-to-end tests for the console backend against a simulated console.
//!
//! Covers the full path a toolkit takes:
//! 1. Query and resize the visible window
//! 2. Configure input mode and text attributes
//! 3. Read decoded input events in order
//! 4. Write cell blocks and fill regions
//! 5. Move the cursor with one-based window coordinates

#![allow(clippy::expect_used, clippy::unwrap_used)]

use termbridge_common::error::TermError;
use termbridge_common::types::{
    Cell, ColorAttr, ConsoleModeFlags, Coordinate, InputEvent, KeyCode, ModifierState,
    MouseButton, NamedKey, Rect, TerminalSize,
};
use termbridge_core::backend::Terminal;
use termbridge_core::backend::console::WindowsConsole;
use termbridge_core::console::consts::{
    FROM_LEFT_1ST_BUTTON_PRESSED, FROM_LEFT_3RD_BUTTON_PRESSED, LEFT_CTRL_PRESSED, MOUSE_MOVED,
    RIGHT_ALT_PRESSED, VK_F1, VK_NEXT,
};
use termbridge_core::console::memory::MemoryConsole;
use termbridge_core::console::{KeyRecord, MouseRecord, RawCoord, RawInputRecord, SmallRect};
use termbridge_core::decoder::KEY_TABLE;

fn console_80x24() -> WindowsConsole<MemoryConsole> {
    WindowsConsole::new(MemoryConsole::with_size(24, 80))
}

fn key(vk: u16, ch: u16, down: bool, state: u32) -> RawInputRecord {
    RawInputRecord::Key(KeyRecord {
        key_down: down,
        repeat_count: 1,
        virtual_key_code: vk,
        virtual_scan_code: 0,
        unicode_char: ch,
        control_key_state: state,
    })
}

fn mouse(x: i16, y: i16, buttons: u32, flags: u32) -> RawInputRecord {
    RawInputRecord::Mouse(MouseRecord {
        position: RawCoord::new(x, y),
        button_state: buttons,
        control_key_state: 0,
        event_flags: flags,
    })
}

// ── Size ─────────────────────────────────────────────────────────────

#[test]
fn size_then_set_size_is_idempotent() {
    let term = console_80x24();
    let size = term.size().unwrap();
    assert_eq!(size, TerminalSize::new(24, 80));
    term.set_size(size).unwrap();
    assert_eq!(term.size().unwrap(), size);
}

#[test]
fn size_reports_window_inside_larger_buffer() {
    let api = MemoryConsole::new(RawCoord::new(80, 9001), SmallRect::new(0, 8000, 79, 8029));
    let term = WindowsConsole::new(api);
    assert_eq!(term.size().unwrap(), TerminalSize::new(30, 80));
}

// ── Mode & attributes ────────────────────────────────────────────────

#[test]
fn every_mode_combination_round_trips() {
    let term = console_80x24();
    for bits in 0u8..128 {
        let flags = ConsoleModeFlags {
            echo_input: bits & 0x01 != 0,
            insert_mode: bits & 0x02 != 0,
            line_input: bits & 0x04 != 0,
            mouse_input: bits & 0x08 != 0,
            processed_input: bits & 0x10 != 0,
            quick_edit_mode: bits & 0x20 != 0,
            window_input: bits & 0x40 != 0,
        };
        term.set_mode(flags).unwrap();
        assert_eq!(term.mode().unwrap(), flags, "combination {bits:#04x}");
    }
}

#[test]
fn color_nibble_outside_range_is_rejected_at_boundary() {
    assert!(matches!(
        ColorAttr::new(16),
        Err(TermError::InvalidArgument { .. })
    ));
}

#[test]
fn all_color_pairs_round_trip() {
    let term = console_80x24();
    for fg in 0..16 {
        for bg in 0..16 {
            let (fg, bg) = (ColorAttr::new(fg).unwrap(), ColorAttr::new(bg).unwrap());
            term.set_text_attribute(fg, bg).unwrap();
            assert_eq!(term.text_attribute().unwrap(), (fg, bg));
        }
    }
}

// ── Input decoding ───────────────────────────────────────────────────

#[test]
fn named_keys_decode_to_their_table_index() {
    for (index, (vk, _)) in KEY_TABLE.iter().enumerate() {
        let term = console_80x24();
        term.api().push_input(key(*vk, 0, true, 0));
        let event = term.read_event().unwrap();
        let expected = NamedKey::from_index(u8::try_from(index).unwrap()).unwrap();
        assert_eq!(
            event,
            InputEvent::Key {
                modifiers: ModifierState::default(),
                code: KeyCode::Named(expected),
            }
        );
    }
}

#[test]
fn literal_character_beats_virtual_key() {
    let term = console_80x24();
    term.api().push_input(key(VK_F1, u16::from(b'q'), true, 0));
    assert!(matches!(
        term.read_event().unwrap(),
        InputEvent::Key { code: KeyCode::Char('q'), .. }
    ));
}

#[test]
fn uninteresting_records_are_skipped_in_order() {
    let term = console_80x24();
    term.api().push_inputs([
        key(VK_NEXT, 0, false, 0),
        RawInputRecord::Focus(true),
        mouse(3, 4, 0, MOUSE_MOVED),
        key(0x10, 0, true, 0),
        key(VK_NEXT, 0, true, LEFT_CTRL_PRESSED | RIGHT_ALT_PRESSED),
        RawInputRecord::Menu(7),
        mouse(10, 5, FROM_LEFT_1ST_BUTTON_PRESSED | FROM_LEFT_3RD_BUTTON_PRESSED, 0),
    ]);

    assert_eq!(
        term.read_event().unwrap(),
        InputEvent::Key {
            modifiers: ModifierState {
                control: true,
                alt: true,
                shift: false,
            },
            code: KeyCode::Named(NamedKey::PageDown),
        }
    );
    assert_eq!(
        term.read_event().unwrap(),
        InputEvent::Mouse {
            modifiers: ModifierState::default(),
            button: MouseButton::Button1,
            row: 5,
            column: 10,
        }
    );
    assert_eq!(term.api().pending_input(), 0);
}

#[test]
fn consecutive_resizes_are_not_deduplicated() {
    let term = console_80x24();
    term.api().push_inputs([
        RawInputRecord::WindowBufferSize(RawCoord::new(80, 24)),
        RawInputRecord::WindowBufferSize(RawCoord::new(80, 24)),
        RawInputRecord::WindowBufferSize(RawCoord::new(100, 30)),
    ]);
    for _ in 0..3 {
        assert_eq!(term.read_event().unwrap(), InputEvent::Resize);
    }
}

#[test]
fn read_failure_is_device_error() {
    let term = console_80x24();
    term.api().push_input(RawInputRecord::Focus(false));
    let err = term.read_event().unwrap_err();
    assert!(matches!(err, TermError::Device { call: "ReadConsoleInput", .. }));
}

// ── Output ───────────────────────────────────────────────────────────

#[test]
fn write_block_returns_exclusive_rect() {
    let term = console_80x24();
    let grid = vec![vec![Cell::new('#', ColorAttr::RED, ColorAttr::BLACK); 4]; 2];
    let written = term
        .write_block(&grid, Coordinate::new(0, 0), Rect::new(10, 20, 12, 24))
        .unwrap();
    assert_eq!(written, Rect::new(10, 20, 12, 24));
    let cell = term.api().cell(11, 23).unwrap();
    assert_eq!(char::from(u8::try_from(cell.ch).unwrap()), '#');
    assert_eq!(cell.attributes, 0x0004);
}

#[test]
fn fill_past_end_returns_short_count() {
    let term = console_80x24();
    let written = term.fill_region('.', 200, Coordinate::new(23, 0)).unwrap();
    assert!(written < 200);
    assert_eq!(written, 80);
}

// ── Window-relative cursor ───────────────────────────────────────────

#[test]
fn cursor_column_past_window_clamps_to_right_edge() {
    let term = console_80x24();
    term.set_cursor_in_window(Coordinate::new(1, 1)).unwrap();
    assert_eq!(term.api().cursor(), RawCoord::new(0, 0));

    term.set_cursor_in_window(Coordinate::new(1, 100)).unwrap();
    assert_eq!(term.api().cursor(), RawCoord::new(79, 0));
    assert_eq!(term.cursor_in_window().unwrap(), Coordinate::new(1, 80));
}
