//! Integration tests for the async session layer over a simulated console.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use termbridge_common::config::TermConfig;
use termbridge_common::error::TermError;
use termbridge_common::types::{ConsoleModeFlags, InputEvent, KeyCode, NamedKey, TerminalSize};
use termbridge_core::backend::Terminal;
use termbridge_core::backend::console::WindowsConsole;
use termbridge_core::console::consts::{VK_ESCAPE, VK_UP};
use termbridge_core::console::memory::MemoryConsole;
use termbridge_core::console::{KeyRecord, RawCoord, RawInputRecord};
use termbridge_sdk::reader::{EventStream, InputReader};
use termbridge_sdk::session::Session;

fn press(vk: u16, ch: u16) -> RawInputRecord {
    RawInputRecord::Key(KeyRecord {
        key_down: true,
        repeat_count: 1,
        virtual_key_code: vk,
        unicode_char: ch,
        ..KeyRecord::default()
    })
}

fn release(vk: u16) -> RawInputRecord {
    RawInputRecord::Key(KeyRecord {
        key_down: false,
        virtual_key_code: vk,
        ..KeyRecord::default()
    })
}

fn console_with(records: Vec<RawInputRecord>) -> Arc<WindowsConsole<MemoryConsole>> {
    let api = MemoryConsole::with_size(24, 80);
    api.push_inputs(records);
    Arc::new(WindowsConsole::new(api))
}

fn named(event: &InputEvent) -> Option<NamedKey> {
    match event {
        InputEvent::Key {
            code: KeyCode::Named(key),
            ..
        } => Some(*key),
        _ => None,
    }
}

#[tokio::test]
async fn reader_delivers_events_then_fuses_on_eof() {
    let term = console_with(vec![
        press(VK_UP, 0),
        release(VK_UP),
        RawInputRecord::WindowBufferSize(RawCoord::new(80, 24)),
    ]);
    let mut reader = InputReader::new(term);

    assert_eq!(named(&reader.read().await.unwrap()), Some(NamedKey::Up));
    assert_eq!(reader.read().await.unwrap(), InputEvent::Resize);

    let err = reader.read().await.unwrap_err();
    assert!(matches!(err, TermError::Device { call: "ReadConsoleInput", .. }));
    assert!(reader.is_fused());
}

#[tokio::test]
async fn stream_preserves_order_and_ends_on_error() {
    let term = console_with(vec![
        press(0x41, u16::from(b'a')),
        release(0x41),
        press(0x42, u16::from(b'b')),
        RawInputRecord::Focus(true),
        press(VK_ESCAPE, 0),
    ]);
    let mut events = EventStream::spawn(term, 1).unwrap();

    let mut seen = Vec::new();
    while let Some(item) = events.next().await {
        match item {
            Ok(event) => seen.push(event),
            Err(e) => {
                assert!(matches!(e, TermError::Device { .. }));
                break;
            }
        }
    }
    assert_eq!(seen.len(), 3);
    assert!(matches!(seen[0], InputEvent::Key { code: KeyCode::Char('a'), .. }));
    assert!(matches!(seen[1], InputEvent::Key { code: KeyCode::Char('b'), .. }));
    assert_eq!(named(&seen[2]), Some(NamedKey::Escape));
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn session_over_console_applies_and_restores_mode() {
    let input = console_with(vec![press(VK_UP, 0)]);
    let output = Arc::new(WindowsConsole::new(MemoryConsole::with_size(30, 100)));
    let before = input.mode().unwrap();

    let session =
        Session::with_backends(TermConfig::default(), input.clone(), output).unwrap();
    assert_eq!(session.size().unwrap(), TerminalSize::new(30, 100));

    {
        let _mode = session.enter().unwrap();
        assert_eq!(input.mode().unwrap(), ConsoleModeFlags::interactive());
        let mut events = session.events().unwrap();
        assert_eq!(named(&events.next().await.unwrap().unwrap()), Some(NamedKey::Up));
    }
    assert_eq!(input.mode().unwrap(), before);
}

#[tokio::test]
async fn session_can_leave_mode_applied() {
    let input = console_with(Vec::new());
    let output = Arc::new(WindowsConsole::new(MemoryConsole::with_size(24, 80)));
    let config = TermConfig {
        restore_mode_on_exit: false,
        ..TermConfig::default()
    };
    let session = Session::with_backends(config, input.clone(), output).unwrap();
    drop(session.enter().unwrap());
    assert_eq!(input.mode().unwrap(), ConsoleModeFlags::interactive());
}
