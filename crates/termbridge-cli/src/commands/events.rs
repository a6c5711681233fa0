//! `tbctl events`: Print decoded input events as they arrive.

use clap::Args;
use termbridge_sdk::session::Session;

use crate::output::describe_event;

/// Arguments for the `events` command.
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Stop after this many events; runs until input ends otherwise.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Executes the `events` command.
///
/// Switches standard input to the configured startup mode for the
/// duration of the command and restores it afterwards.
///
/// # Errors
///
/// Returns an error if the mode cannot be applied, the runtime cannot
/// start, or reading input fails.
pub fn execute(session: &Session, args: &EventsArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let guard = session.enter()?;
    let result = runtime.block_on(stream(session, args.count));
    if session.config().restore_mode_on_exit {
        guard.restore()?;
    }
    result
}

async fn stream(session: &Session, count: Option<usize>) -> anyhow::Result<()> {
    let mut events = session.events()?;
    let mut seen = 0usize;
    while count.is_none_or(|limit| seen < limit) {
        let Some(item) = events.next().await else {
            break;
        };
        println!("{}", describe_event(&item?));
        seen += 1;
    }
    tracing::debug!(seen, "event stream finished");
    Ok(())
}
