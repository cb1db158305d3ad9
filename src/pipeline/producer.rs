//! Producer task
//!
//! Reads the command source from disk and feeds the stream parser, which
//! submits validated commands into the shared buffer. Runs as the single
//! writer side of the pipeline; back-pressure from a full buffer suspends
//! it until workers catch up.

use crate::parser::CommandStreamParser;
use crate::pipeline::CommandBuffer;
use crate::types::EngineError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The producing half of the pipeline
#[derive(Debug, Clone)]
pub struct Producer {
    parser: CommandStreamParser,
    buffer: Arc<CommandBuffer>,
}

impl Producer {
    /// Create a producer submitting into the given buffer.
    pub fn new(parser: CommandStreamParser, buffer: Arc<CommandBuffer>) -> Self {
        Producer { parser, buffer }
    }

    /// Read the source file and submit its commands
    ///
    /// # Arguments
    ///
    /// * `path` - the command source file
    /// * `max_commands` - stop after this many valid commands; `0` reads all
    ///
    /// # Returns
    ///
    /// The number of commands submitted into the buffer.
    ///
    /// # Errors
    ///
    /// * [`EngineError::Io`] if the source cannot be read
    /// * [`EngineError::Syntax`] carrying every syntax error in the source
    ///
    /// Either way, commands already submitted remain in the buffer and are
    /// still processed by the workers.
    pub async fn run(&self, path: &Path, max_commands: usize) -> Result<usize, EngineError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let source_name = path.display().to_string();
        let submitted = self
            .parser
            .parse(&source_name, &text, max_commands, &self.buffer)
            .await?;

        info!(source = %source_name, submitted, "producer finished");
        Ok(submitted)
    }
}
