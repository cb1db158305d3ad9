//! Drain coordination
//!
//! Bridges the gap between "the producer has submitted everything" and "the
//! workers have taken everything": shutdown must not be signalled while
//! commands are still buffered. The coordinator polls the buffer until an
//! empty snapshot is observed.
//!
//! A take is the only way an item leaves the buffer, and a worker that has
//! taken a command finishes it before looking at the cancellation token, so
//! observing an empty buffer after the producer has stopped is sufficient
//! for the no-abandonment guarantee.

use crate::pipeline::CommandBuffer;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How often the buffer is re-examined while waiting for it to empty.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Waits for the command buffer to empty out
#[derive(Debug, Clone)]
pub struct DrainCoordinator {
    buffer: Arc<CommandBuffer>,
    interval: Duration,
}

impl DrainCoordinator {
    /// Create a coordinator polling at [`DEFAULT_POLL_INTERVAL`].
    pub fn new(buffer: Arc<CommandBuffer>) -> Self {
        Self::with_interval(buffer, DEFAULT_POLL_INTERVAL)
    }

    /// Create a coordinator with an explicit polling interval.
    pub fn with_interval(buffer: Arc<CommandBuffer>, interval: Duration) -> Self {
        DrainCoordinator { buffer, interval }
    }

    /// Return once an empty buffer has been observed
    ///
    /// Only meaningful after the producer has stopped submitting; while a
    /// producer is live the buffer may refill after this returns.
    pub async fn wait_until_drained(&self) {
        while !self.buffer.is_empty() {
            tokio::time::sleep(self.interval).await;
        }
        info!("command buffer drained");
    }
}
