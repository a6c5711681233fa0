//! Terminal session facade.

use std::sync::Arc;

use termbridge_common::config::TermConfig;
use termbridge_common::error::Result;
use termbridge_common::types::TerminalSize;
use termbridge_core::backend::{Stream, Terminal, detect_backend};

use crate::guard::ModeGuard;
use crate::reader::{EventStream, InputReader};

/// Backends for standard input and output plus the configuration driving them.
pub struct Session {
    config: TermConfig,
    input: Arc<dyn Terminal>,
    output: Arc<dyn Terminal>,
}

impl Session {
    /// Creates a session on the process's standard streams.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` if `config` fails validation.
    pub fn new(config: TermConfig) -> Result<Self> {
        Self::with_backends(
            config,
            Arc::from(detect_backend(Stream::Input)),
            Arc::from(detect_backend(Stream::Output)),
        )
    }

    /// Creates a session on explicit backends.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` if `config` fails validation.
    pub fn with_backends(
        config: TermConfig,
        input: Arc<dyn Terminal>,
        output: Arc<dyn Terminal>,
    ) -> Result<Self> {
        config.validate()?;
        tracing::info!(input = input.name(), output = output.name(), "session opened");
        Ok(Self {
            config,
            input,
            output,
        })
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &TermConfig {
        &self.config
    }

    /// Backend for standard input.
    #[must_use]
    pub const fn input(&self) -> &Arc<dyn Terminal> {
        &self.input
    }

    /// Backend for standard output.
    #[must_use]
    pub const fn output(&self) -> &Arc<dyn Terminal> {
        &self.output
    }

    /// Current size of the output terminal.
    ///
    /// Falls back to the configured size when the backend has no sizing
    /// primitive at all.
    ///
    /// # Errors
    ///
    /// Returns the backend's error for any failure other than a missing
    /// primitive.
    pub fn size(&self) -> Result<TerminalSize> {
        match self.output.size() {
            Err(e) if e.is_unsupported() => {
                tracing::debug!(size = %self.config.fallback_size, "using configured fallback size");
                Ok(self.config.fallback_size)
            }
            other => other,
        }
    }

    /// Switches input to the configured startup mode.
    ///
    /// The returned guard restores the previous mode on drop unless
    /// `restore_mode_on_exit` is off.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the mode cannot be read or written.
    pub fn enter(&self) -> Result<ModeGuard<'_, dyn Terminal>> {
        let mut guard = ModeGuard::apply(self.input.as_ref(), self.config.startup_mode)?;
        if !self.config.restore_mode_on_exit {
            guard.disarm();
        }
        Ok(guard)
    }

    /// A one-at-a-time reader on the input backend.
    #[must_use]
    pub fn reader(&self) -> InputReader<dyn Terminal> {
        InputReader::new(Arc::clone(&self.input))
    }

    /// Starts streaming input events through a channel of `event_buffer` slots.
    ///
    /// # Errors
    ///
    /// Returns `TermError::Device` if the reader thread cannot be spawned.
    pub fn events(&self) -> Result<EventStream> {
        EventStream::spawn(Arc::clone(&self.input), self.config.event_buffer)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("input", &self.input.name())
            .field("output", &self.output.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbridge_common::error::TermError;
    use termbridge_core::backend::env::EnvTerminal;

    struct NoSize;

    impl Terminal for NoSize {
        fn name(&self) -> &'static str {
            "no-size"
        }

        fn size(&self) -> Result<TerminalSize> {
            Err(TermError::unsupported("size"))
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TermConfig {
            event_buffer: 0,
            ..TermConfig::default()
        };
        let err = Session::with_backends(config, Arc::new(EnvTerminal), Arc::new(EnvTerminal))
            .unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
    }

    #[test]
    fn unsupported_size_uses_configured_fallback() {
        let config = TermConfig {
            fallback_size: TerminalSize::new(40, 120),
            ..TermConfig::default()
        };
        let session = Session::with_backends(config, Arc::new(NoSize), Arc::new(NoSize)).unwrap();
        assert_eq!(session.size().unwrap(), TerminalSize::new(40, 120));
    }

    #[test]
    fn new_session_uses_detected_backends() {
        let session = Session::new(TermConfig::default()).unwrap();
        assert!(!session.output().name().is_empty());
    }
}
