//! Common types and utilities shared across modules

use clap::Parser;
use std::path::PathBuf;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Also write a debug log to this file")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: info (-v)
    /// - 2: debug (-vv)
    /// - 3: trace (-vvv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
