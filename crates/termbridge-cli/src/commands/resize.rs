//! `tbctl resize`: Resize the visible terminal area.

use clap::Args;
use termbridge_common::types::TerminalSize;
use termbridge_sdk::session::Session;

/// Arguments for the `resize` command.
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// New number of rows.
    pub rows: u16,

    /// New number of columns.
    pub columns: u16,
}

/// Executes the `resize` command.
///
/// # Errors
///
/// Returns an error if the size is zero or the backend refuses it.
pub fn execute(session: &Session, args: &ResizeArgs) -> anyhow::Result<()> {
    let size = TerminalSize::new(args.rows, args.columns);
    session.output().set_size(size)?;
    tracing::info!(%size, backend = session.output().name(), "terminal resized");
    println!("{}", session.size()?);
    Ok(())
}
