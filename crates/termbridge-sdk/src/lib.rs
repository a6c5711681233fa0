//! # termbridge-sdk
//!
//! Async-facing API for programs built on termbridge.
//!
//! Provides three main entry points:
//! - [`Session`](session::Session): backends for both standard streams, built from a
//!   [`TermConfig`](termbridge_common::config::TermConfig).
//! - [`InputReader`](reader::InputReader) and [`EventStream`](reader::EventStream):
//!   move the blocking input read off the caller's executor.
//! - [`ModeGuard`](guard::ModeGuard): switches the input mode and puts it back on drop.
//!
//! # Example
//!
//! ```rust,no_run
//! use termbridge_common::config::TermConfig;
//! use termbridge_sdk::session::Session;
//!
//! # async fn run() -> termbridge_common::error::Result<()> {
//! let session = Session::new(TermConfig::default())?;
//! let _mode = session.enter()?;
//! let mut events = session.events()?;
//! while let Some(event) = events.next().await {
//!     println!("{:?}", event?);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod guard;
pub mod reader;
pub mod session;
