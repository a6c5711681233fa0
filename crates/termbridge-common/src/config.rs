//! Configuration model for a termbridge session.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COLUMNS, DEFAULT_EVENT_BUFFER, DEFAULT_ROWS};
use crate::error::{Result, TermError};
use crate::types::{ConsoleModeFlags, TerminalSize};

/// Root configuration for a terminal session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    /// Size reported when no sizing primitive is available.
    pub fallback_size: TerminalSize,
    /// Input mode applied when the session starts.
    pub startup_mode: ConsoleModeFlags,
    /// Capacity of the input event channel.
    pub event_buffer: usize,
    /// Whether the previous input mode is restored when the session ends.
    pub restore_mode_on_exit: bool,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            fallback_size: TerminalSize::new(DEFAULT_ROWS, DEFAULT_COLUMNS),
            startup_mode: ConsoleModeFlags::interactive(),
            event_buffer: DEFAULT_EVENT_BUFFER,
            restore_mode_on_exit: true,
        }
    }
}

impl TermConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` if the document is malformed or
    /// fails [`TermConfig::validate`].
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| TermError::invalid(format!("configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `TermError::InvalidArgument` for a zero event buffer or a
    /// zero fallback dimension.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer == 0 {
            return Err(TermError::invalid("event_buffer must be at least 1"));
        }
        if self.fallback_size.rows == 0 || self.fallback_size.columns == 0 {
            return Err(TermError::invalid(format!(
                "fallback_size {} has a zero dimension",
                self.fallback_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TermConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fallback_size, TerminalSize::new(25, 80));
        assert_eq!(config.startup_mode, ConsoleModeFlags::interactive());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = TermConfig::from_json(r#"{ "event_buffer": 8 }"#).unwrap();
        assert_eq!(config.event_buffer, 8);
        assert!(config.restore_mode_on_exit);
        assert_eq!(config.fallback_size.columns, 80);
    }

    #[test]
    fn zero_event_buffer_is_rejected() {
        let err = TermConfig::from_json(r#"{ "event_buffer": 0 }"#).unwrap_err();
        assert!(matches!(err, TermError::InvalidArgument { .. }));
    }

    #[test]
    fn malformed_json_is_invalid_argument() {
        let err = TermConfig::from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn zero_fallback_dimension_is_rejected() {
        let config = TermConfig {
            fallback_size: TerminalSize::new(0, 80),
            ..TermConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
