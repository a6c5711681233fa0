//! `tbctl info`: Show platform, backend and terminal details.

use clap::Args;
use termbridge_core::backend::platform_info;
use termbridge_core::encoding::system_encoding;
use termbridge_sdk::session::Session;

/// Arguments for the `info` command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Print the details as a JSON object.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `info` command.
///
/// A size query failure is reported in the output rather than aborting,
/// so the command stays useful when no terminal is attached.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(session: &Session, args: &InfoArgs) -> anyhow::Result<()> {
    let platform = platform_info();
    let encoding = system_encoding();
    let size = session.size();

    if args.json {
        let value = serde_json::json!({
            "os": platform.os,
            "arch": platform.arch,
            "backend": platform.backend,
            "input": session.input().name(),
            "output": session.output().name(),
            "resize_signal": platform.resize_signal,
            "encoding": encoding,
            "size": size.as_ref().ok(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Platform:      {}/{}", platform.os, platform.arch);
    println!("Backend:       {}", platform.backend);
    println!("Input:         {}", session.input().name());
    println!("Output:        {}", session.output().name());
    println!(
        "Resize signal: {}",
        platform
            .resize_signal
            .map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    println!("Encoding:      {encoding}");
    match size {
        Ok(size) => println!("Size:          {size}"),
        Err(e) => println!("Size:          unavailable ({e})"),
    }
    Ok(())
}
