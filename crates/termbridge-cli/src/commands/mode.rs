//! `tbctl mode`: Show the current input mode of standard input.

use clap::Args;
use termbridge_sdk::session::Session;

use crate::output::mode_rows;

/// Arguments for the `mode` command.
#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Print the flags as a JSON object.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `mode` command.
///
/// # Errors
///
/// Returns an error if the input backend cannot report its mode.
pub fn execute(session: &Session, args: &ModeArgs) -> anyhow::Result<()> {
    let mode = session.input().mode()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&mode)?);
        return Ok(());
    }

    println!("{:<18} {:<5}", "FLAG", "SET");
    for (name, set) in mode_rows(&mode) {
        println!("{:<18} {:<5}", name, if set { "yes" } else { "no" });
    }
    Ok(())
}
