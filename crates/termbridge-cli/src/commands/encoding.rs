//! `tbctl encoding`: Print the system text encoding.

use clap::Args;
use termbridge_core::encoding::system_encoding;

/// Arguments for the `encoding` command.
#[derive(Args, Debug)]
pub struct EncodingArgs {}

/// Executes the `encoding` command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn execute(_args: &EncodingArgs) -> anyhow::Result<()> {
    println!("{}", system_encoding());
    Ok(())
}
