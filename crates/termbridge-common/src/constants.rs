//! System-wide constants and defaults.

/// Row count reported when no sizing primitive and no `LINES` value exist.
pub const DEFAULT_ROWS: u16 = 25;

/// Column count reported when no sizing primitive and no `COLUMNS` value exist.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Environment variable consulted for the row count fallback.
pub const LINES_VAR: &str = "LINES";

/// Environment variable consulted for the column count fallback.
pub const COLUMNS_VAR: &str = "COLUMNS";

/// Codeset name reported when the system encoding cannot be determined.
pub const FALLBACK_CODESET: &str = "ASCII";

/// Default capacity of the channel between the input worker and its consumer.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Largest cursor size accepted by the console, in percent of a cell.
pub const MAX_CURSOR_SIZE: u8 = 100;

/// Largest value a 4-bit color attribute can hold.
pub const MAX_COLOR_ATTR: u8 = 0x0F;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "tbctl";
