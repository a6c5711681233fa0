//! `tbctl size`: Print the visible terminal size.

use clap::Args;
use termbridge_sdk::session::Session;

/// Arguments for the `size` command.
#[derive(Args, Debug)]
pub struct SizeArgs {
    /// Print the size as a JSON object.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `size` command.
///
/// # Errors
///
/// Returns an error if the output backend cannot report its size.
pub fn execute(session: &Session, args: &SizeArgs) -> anyhow::Result<()> {
    let size = session.size()?;
    if args.json {
        println!("{}", serde_json::to_string(&size)?);
    } else {
        println!("{size}");
    }
    Ok(())
}
