//! # termbridge-core
//!
//! One terminal contract over two control surfaces.
//!
//! This crate provides:
//! - **Backends**: the [`Terminal`](backend::Terminal) capability trait with a
//!   POSIX implementation (ioctl + termios), a Windows console implementation
//!   and an environment-variable fallback.
//! - **Console model**: plain-data mirrors of the Windows console records and
//!   the [`ConsoleApi`](console::ConsoleApi) seam the console backend drives.
//! - **Input decoding**: raw console records normalized into
//!   [`InputEvent`](termbridge_common::types::InputEvent)s.
//! - **Rendering**: bulk cell-block writes and region fills.
//! - **Window helpers**: one-based, window-relative cursor moves and fills,
//!   scrolling and code pages on the console backend.
//! - **Encoding**: the system codeset name and the resize signal number.
//!
//! All unsafe system calls are encapsulated in safe wrappers with
//! `// SAFETY:` documentation.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod console;
pub mod decoder;
pub mod encoding;
pub mod render;
pub mod window;
