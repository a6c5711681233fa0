//! Off-thread input reading.
//!
//! [`Terminal::read_event`] blocks with no timeout and no cancellation. Both
//! types here keep that wait off the async executor: [`InputReader`] borrows
//! a thread from tokio's blocking pool for each read, [`EventStream`] keeps
//! one dedicated thread reading for as long as the stream is alive.

use std::io;
use std::sync::Arc;
use std::thread;

use termbridge_common::error::{Result, TermError};
use termbridge_common::types::InputEvent;
use termbridge_core::backend::Terminal;
use tokio::sync::mpsc;

fn fused_error() -> TermError {
    TermError::device(
        "read_event",
        io::Error::new(io::ErrorKind::BrokenPipe, "input reader failed earlier"),
    )
}

/// One-at-a-time asynchronous reads from a terminal.
///
/// `read` takes `&mut self`, so a second read cannot start before the first
/// resolves. After any failure the reader is fused: every later call fails
/// without touching the handle, which must be re-acquired.
#[derive(Debug)]
pub struct InputReader<T: Terminal + ?Sized + 'static> {
    terminal: Arc<T>,
    fused: bool,
}

impl<T: Terminal + ?Sized + 'static> InputReader<T> {
    /// Creates a reader over `terminal`.
    #[must_use]
    pub const fn new(terminal: Arc<T>) -> Self {
        Self {
            terminal,
            fused: false,
        }
    }

    /// Returns whether an earlier read failed.
    #[must_use]
    pub const fn is_fused(&self) -> bool {
        self.fused
    }

    /// Waits for the next input event without blocking the executor.
    ///
    /// # Errors
    ///
    /// Returns the backend's `TermError::Device` if the read fails, and a
    /// `BrokenPipe` device error on every call after that.
    pub async fn read(&mut self) -> Result<InputEvent> {
        if self.fused {
            return Err(fused_error());
        }
        let terminal = Arc::clone(&self.terminal);
        let outcome = tokio::task::spawn_blocking(move || terminal.read_event())
            .await
            .map_err(|e| TermError::device("spawn_blocking", io::Error::other(e)))
            .and_then(|r| r);
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "input reader fused");
            self.fused = true;
        }
        outcome
    }
}

/// Input events delivered over a bounded channel by a dedicated reader thread.
///
/// Events arrive in the order the terminal produced them. The stream ends
/// after yielding the first error. Dropping the stream stops the thread once
/// its pending read returns.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::Receiver<Result<InputEvent>>,
}

impl EventStream {
    /// Starts a reader thread on `terminal` feeding a channel of `capacity` events.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a zero capacity and
    /// `TermError::Device` if the thread cannot be spawned.
    pub fn spawn<T: Terminal + ?Sized + 'static>(terminal: Arc<T>, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TermError::invalid("event channel capacity must be at least 1"));
        }
        let (tx, rx) = mpsc::channel(capacity);
        let _worker = thread::Builder::new()
            .name("termbridge-input".into())
            .spawn(move || read_loop(terminal.as_ref(), &tx))
            .map_err(|e| TermError::device("thread::spawn", e))?;
        tracing::debug!(capacity, "input event stream started");
        Ok(Self { rx })
    }

    /// Waits for the next event. `None` once the reader thread has stopped.
    pub async fn next(&mut self) -> Option<Result<InputEvent>> {
        self.rx.recv().await
    }
}

fn read_loop<T: Terminal + ?Sized>(terminal: &T, tx: &mpsc::Sender<Result<InputEvent>>) {
    loop {
        let item = terminal.read_event();
        let failed = item.is_err();
        if tx.blocking_send(item).is_err() {
            tracing::debug!("event stream dropped, reader exiting");
            return;
        }
        if failed {
            tracing::debug!("input read failed, reader exiting");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbridge_common::types::TerminalSize;

    struct Broken;

    impl Terminal for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn size(&self) -> Result<TerminalSize> {
            Ok(TerminalSize::new(1, 1))
        }
    }

    #[tokio::test]
    async fn reader_fuses_after_failure() {
        let mut reader = InputReader::new(Arc::new(Broken));
        let first = reader.read().await.unwrap_err();
        assert!(first.is_unsupported());
        assert!(reader.is_fused());

        let second = reader.read().await.unwrap_err();
        assert!(matches!(second, TermError::Device { call: "read_event", .. }));
    }

    #[tokio::test]
    async fn stream_ends_after_error() {
        let mut events = EventStream::spawn(Arc::new(Broken), 4).unwrap();
        assert!(events.next().await.unwrap().is_err());
        assert!(events.next().await.is_none());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = EventStream::spawn(Arc::new(Broken), 0).unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
    }
}
