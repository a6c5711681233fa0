//! CLI command definitions and dispatch.

pub mod encoding;
pub mod events;
pub mod info;
pub mod mode;
pub mod resize;
pub mod size;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use termbridge_common::config::TermConfig;
use termbridge_sdk::session::Session;

/// tbctl: inspect and drive the current terminal.
#[derive(Parser, Debug)]
#[command(name = "tbctl", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON session configuration; missing fields take their defaults.
    #[arg(long, global = true, env = "TBCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the visible terminal size.
    Size(size::SizeArgs),
    /// Resize the visible terminal area.
    Resize(resize::ResizeArgs),
    /// Show the current input mode.
    Mode(mode::ModeArgs),
    /// Print the system text encoding.
    Encoding(encoding::EncodingArgs),
    /// Show platform and backend details.
    Info(info::InfoArgs),
    /// Print decoded input events as they arrive.
    Events(events::EventsArgs),
}

/// Loads the session configuration, or the defaults when no file is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid configuration.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TermConfig> {
    let Some(path) = path else {
        return Ok(TermConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config =
        TermConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn open_session(config: Option<&Path>) -> anyhow::Result<Session> {
    Ok(Session::new(load_config(config)?)?)
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Command::Size(args) => size::execute(&open_session(config)?, &args),
        Command::Resize(args) => resize::execute(&open_session(config)?, &args),
        Command::Mode(args) => mode::execute(&open_session(config)?, &args),
        Command::Encoding(args) => encoding::execute(&args),
        Command::Info(args) => info::execute(&open_session(config)?, &args),
        Command::Events(args) => events::execute(&open_session(config)?, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resize_takes_rows_then_columns() {
        let cli = Cli::try_parse_from(["tbctl", "resize", "40", "120"]).unwrap();
        let Command::Resize(args) = cli.command else {
            panic!("expected resize");
        };
        assert_eq!((args.rows, args.columns), (40, 120));
    }

    #[test]
    fn events_count_is_optional() {
        let cli = Cli::try_parse_from(["tbctl", "events"]).unwrap();
        assert!(matches!(cli.command, Command::Events(events::EventsArgs { count: None })));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/tbctl.json"))).is_err());
        assert_eq!(load_config(None).unwrap(), TermConfig::default());
    }
}
