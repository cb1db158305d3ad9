//! Command-line interface

pub mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse the process arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
