//! The concurrent command pipeline
//!
//! One producer parses the command source and submits tokenized commands
//! into a bounded buffer; a pool of workers drains the buffer and applies
//! the commands to accounts, serialized per account by a lock table. A
//! drain coordinator sequences shutdown so that every buffered command is
//! executed before the workers are cancelled.
//!
//! Module map:
//! - `buffer` - the bounded FIFO hand-off between producer and workers
//! - `locks` - per-account mutexes keyed at startup
//! - `producer` - file reading and command submission
//! - `worker` - the worker pool and per-command execution
//! - `drain` - the empty-buffer wait used during shutdown
//!
//! [`Pipeline`] wires the pieces together for one run.

pub mod buffer;
pub mod drain;
pub mod locks;
pub mod producer;
pub mod worker;

pub use buffer::{CommandBuffer, DEFAULT_CAPACITY};
pub use drain::{DrainCoordinator, DEFAULT_POLL_INTERVAL};
pub use locks::LockTable;
pub use producer::Producer;
pub use worker::{WorkerPool, WorkerReport};

use crate::account::AccountRegistry;
use crate::parser::{CommandGrammar, CommandStreamParser};
use crate::types::EngineError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Tunable knobs for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of worker tasks
    pub workers: usize,

    /// Capacity of the command buffer
    pub buffer_capacity: usize,

    /// Stop the producer after this many valid commands; `0` reads all
    pub max_commands: usize,

    /// Polling interval of the drain coordinator
    pub drain_poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            workers: num_cpus::get(),
            buffer_capacity: DEFAULT_CAPACITY,
            max_commands: 0,
            drain_poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Aggregate outcome of one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands the producer submitted into the buffer
    pub submitted: usize,

    /// Commands dequeued and executed by the workers
    pub processed: u64,

    /// Commands that failed execution and were skipped
    pub failed: u64,

    /// Commands accepted but defined as no-ops
    pub ignored: u64,
}

/// Orchestrates one source file through the full producer/worker cycle
pub struct Pipeline {
    registry: Arc<AccountRegistry>,
    parser: CommandStreamParser,
    config: PipelineConfig,
}

impl Pipeline {
    /// Assemble a pipeline over the given accounts and grammar.
    pub fn new(registry: Arc<AccountRegistry>, grammar: CommandGrammar, config: PipelineConfig) -> Self {
        Pipeline {
            registry,
            parser: CommandStreamParser::new(grammar),
            config,
        }
    }

    /// Run the pipeline over one command source
    ///
    /// The shutdown sequence is strict: wait for the producer, wait for the
    /// buffer to drain, and only then cancel and join the workers. A
    /// producer failure (unreadable file or syntax errors) does not skip the
    /// drain: commands buffered before the failure are still executed, and
    /// the error surfaces afterwards.
    ///
    /// # Errors
    ///
    /// * [`EngineError::Io`] if the source could not be read
    /// * [`EngineError::Syntax`] if the source contained syntax errors
    pub async fn run(&self, input: &Path) -> Result<RunSummary, EngineError> {
        let buffer = Arc::new(CommandBuffer::new(self.config.buffer_capacity));
        let locks = Arc::new(LockTable::new(self.registry.numbers().map(str::to_string)));

        info!(
            workers = self.config.workers,
            capacity = buffer.capacity(),
            accounts = self.registry.len(),
            "starting pipeline"
        );
        let pool = WorkerPool::spawn(
            self.config.workers,
            Arc::clone(&buffer),
            Arc::clone(&self.registry),
            locks,
        );

        let producer = Producer::new(self.parser.clone(), Arc::clone(&buffer));
        let produced = producer.run(input, self.config.max_commands).await;

        DrainCoordinator::with_interval(Arc::clone(&buffer), self.config.drain_poll_interval)
            .wait_until_drained()
            .await;

        let mut totals = WorkerReport::default();
        for report in pool.shutdown().await {
            totals.merge(report);
        }
        info!(
            processed = totals.processed,
            failed = totals.failed,
            "workers finished"
        );

        // Surfacing a producer error only after the drain keeps the
        // already-buffered prefix of the source fully executed.
        let submitted = produced?;

        Ok(RunSummary {
            submitted,
            processed: totals.processed,
            failed: totals.failed,
            ignored: totals.ignored,
        })
    }
}
