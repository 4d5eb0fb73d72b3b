//! ui-release library - expose modules for testing
//!
//! Staging, archive and hash steps plus the command handlers behind the
//! `ui-release` binary.

pub mod archive;
pub mod commands;
pub mod common;
pub mod errors;
pub mod hashes;
pub mod staging;

pub use common::GlobalOpts;
