//! # termbridge-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the entire termbridge workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and carries no platform code. Every value here is plain
//! data that both the Unix and the Windows backends translate to and from.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
