//! Scoped input-mode changes.

use termbridge_common::error::Result;
use termbridge_common::types::ConsoleModeFlags;
use termbridge_core::backend::Terminal;

/// Applies an input mode and restores the previous one when dropped.
///
/// A failed restore on drop is logged, not raised; call
/// [`ModeGuard::restore`] to observe it.
pub struct ModeGuard<'a, T: Terminal + ?Sized> {
    terminal: &'a T,
    previous: ConsoleModeFlags,
    armed: bool,
}

impl<'a, T: Terminal + ?Sized> ModeGuard<'a, T> {
    /// Records the current mode of `terminal`, then switches it to `mode`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the mode cannot be read or written.
    /// Nothing is changed when reading fails.
    pub fn apply(terminal: &'a T, mode: ConsoleModeFlags) -> Result<Self> {
        let previous = terminal.mode()?;
        terminal.set_mode(mode)?;
        tracing::info!(backend = terminal.name(), mode = ?mode, "input mode applied");
        Ok(Self {
            terminal,
            previous,
            armed: true,
        })
    }

    /// The mode that will be restored.
    #[must_use]
    pub const fn previous(&self) -> ConsoleModeFlags {
        self.previous
    }

    /// Leaves the applied mode in place when the guard goes away.
    pub const fn disarm(&mut self) {
        self.armed = false;
    }

    /// Restores the previous mode now, reporting any failure.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the mode cannot be written.
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.terminal.set_mode(self.previous)
    }
}

impl<T: Terminal + ?Sized> Drop for ModeGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.terminal.set_mode(self.previous) {
            Ok(()) => tracing::info!(backend = self.terminal.name(), "input mode restored"),
            Err(e) => tracing::warn!(error = %e, "failed to restore input mode"),
        }
    }
}

impl<T: Terminal + ?Sized> std::fmt::Debug for ModeGuard<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeGuard")
            .field("backend", &self.terminal.name())
            .field("previous", &self.previous)
            .field("armed", &self.armed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbridge_core::backend::console::WindowsConsole;
    use termbridge_core::console::memory::MemoryConsole;

    #[test]
    fn drop_restores_previous_mode() {
        let term = WindowsConsole::new(MemoryConsole::with_size(4, 4));
        let before = term.mode().unwrap();
        {
            let guard = ModeGuard::apply(&term, ConsoleModeFlags::interactive()).unwrap();
            assert_eq!(guard.previous(), before);
            assert_eq!(term.mode().unwrap(), ConsoleModeFlags::interactive());
        }
        assert_eq!(term.mode().unwrap(), before);
    }

    #[test]
    fn disarmed_guard_keeps_mode() {
        let term = WindowsConsole::new(MemoryConsole::with_size(4, 4));
        let mut guard = ModeGuard::apply(&term, ConsoleModeFlags::interactive()).unwrap();
        guard.disarm();
        drop(guard);
        assert_eq!(term.mode().unwrap(), ConsoleModeFlags::interactive());
    }

    #[test]
    fn failed_restore_on_drop_does_not_panic() {
        let term = WindowsConsole::new(MemoryConsole::with_size(4, 4));
        let guard = ModeGuard::apply(&term, ConsoleModeFlags::default()).unwrap();
        term.api().detach();
        drop(guard);
    }

    #[test]
    fn explicit_restore_reports_errors() {
        let term = WindowsConsole::new(MemoryConsole::with_size(4, 4));
        let guard = ModeGuard::apply(&term, ConsoleModeFlags::default()).unwrap();
        term.api().detach();
        assert!(guard.restore().is_err());
    }
}
