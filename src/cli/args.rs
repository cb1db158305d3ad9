//! Command-line argument definitions

use crate::pipeline::{PipelineConfig, DEFAULT_CAPACITY};
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// Concurrent bank-transaction engine
///
/// Reads a delimited command file and applies its deposits and withdrawals
/// to the configured accounts through a bounded producer/worker pipeline.
#[derive(Parser, Debug)]
#[command(name = "teller-engine", version, about)]
pub struct CliArgs {
    /// Path to the command source file
    #[arg(value_name = "INPUT")]
    pub input_file: PathBuf,

    /// Number of worker tasks (defaults to the number of CPUs)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Capacity of the command buffer
    #[arg(long, value_name = "N")]
    pub buffer_capacity: Option<usize>,

    /// Stop after this many valid commands (0 reads the whole file)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_commands: usize,
}

impl CliArgs {
    /// Fold the arguments into a pipeline configuration
    ///
    /// Zero values for workers or capacity are replaced with the defaults;
    /// a pipeline with no workers or no buffer space cannot make progress.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();

        let workers = match self.workers {
            Some(0) => {
                warn!(default = defaults.workers, "worker count 0 ignored, using default");
                defaults.workers
            }
            Some(n) => n,
            None => defaults.workers,
        };
        let buffer_capacity = match self.buffer_capacity {
            Some(0) => {
                warn!(default = DEFAULT_CAPACITY, "buffer capacity 0 ignored, using default");
                DEFAULT_CAPACITY
            }
            Some(n) => n,
            None => DEFAULT_CAPACITY,
        };

        PipelineConfig {
            workers,
            buffer_capacity,
            max_commands: self.max_commands,
            ..defaults
        }
    }
}
