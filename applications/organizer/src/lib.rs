//! VibeQueue organizer console library.
//!
//! Glue between the terminal surface and the VibeQueue library crates:
//! configuration, token persistence and the interactive event loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod console;
pub mod error;
pub mod token;
