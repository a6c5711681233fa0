//! Environment fallback for platforms with no sizing primitive.

use termbridge_common::constants::{COLUMNS_VAR, DEFAULT_COLUMNS, DEFAULT_ROWS, LINES_VAR};
use termbridge_common::error::Result;
use termbridge_common::types::TerminalSize;

use super::Terminal;

fn parse_or(value: Option<&str>, default: u16) -> u16 {
    value
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

/// Builds a size from `LINES` and `COLUMNS` values.
///
/// Each value is parsed on its own; a missing or unparsable one falls back
/// to 25 rows or 80 columns.
#[must_use]
pub fn size_from_vars(lines: Option<&str>, columns: Option<&str>) -> TerminalSize {
    TerminalSize::new(
        parse_or(lines, DEFAULT_ROWS),
        parse_or(columns, DEFAULT_COLUMNS),
    )
}

/// Terminal whose only capability is reporting a size from the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvTerminal;

impl EnvTerminal {
    /// Creates the fallback backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Terminal for EnvTerminal {
    fn name(&self) -> &'static str {
        "env"
    }

    fn size(&self) -> Result<TerminalSize> {
        let lines = std::env::var(LINES_VAR).ok();
        let columns = std::env::var(COLUMNS_VAR).ok();
        let size = size_from_vars(lines.as_deref(), columns.as_deref());
        tracing::debug!(rows = size.rows, columns = size.columns, "size from environment");
        Ok(size)
    }
}
