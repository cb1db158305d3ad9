//! Bounded command buffer
//!
//! The single hand-off point between the producer and the worker pool: a
//! fixed-capacity FIFO whose `put` awaits while full and whose `take`
//! awaits while empty. Items emerge exactly once, in submission order.

use crate::types::TokenizedCommand;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// Reference capacity used by the pipeline when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Fixed-capacity FIFO hand-off between one producer and many workers
///
/// Safe for concurrent `put`/`take` from any number of tasks. The queue
/// itself sits behind a plain mutex (critical sections never await);
/// blocked callers park on [`Notify`] and re-check on wakeup.
///
/// [`CommandBuffer::is_empty`] and [`CommandBuffer::len`] are advisory
/// snapshots only: they carry no atomicity guarantee against concurrent
/// `put`/`take`, which is why the drain coordinator treats an "empty"
/// observation as necessary but not sufficient on its own (see
/// [`DrainCoordinator`](crate::pipeline::DrainCoordinator)).
#[derive(Debug)]
pub struct CommandBuffer {
    queue: Mutex<VecDeque<TokenizedCommand>>,
    capacity: usize,
    space_available: Notify,
    item_available: Notify,
}

impl CommandBuffer {
    /// Create a buffer with the given capacity
    ///
    /// A zero capacity is clamped to one; a buffer that can never accept an
    /// item would deadlock the pipeline on the first `put`.
    pub fn new(capacity: usize) -> Self {
        CommandBuffer {
            queue: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
            capacity: capacity.max(1),
            space_available: Notify::new(),
            item_available: Notify::new(),
        }
    }

    /// Append a command, awaiting while the buffer is full.
    pub async fn put(&self, command: TokenizedCommand) {
        let mut pending = Some(command);
        loop {
            {
                let mut queue = self.lock_queue();
                if queue.len() < self.capacity {
                    if let Some(command) = pending.take() {
                        queue.push_back(command);
                    }
                    let has_space = queue.len() < self.capacity;
                    drop(queue);
                    // Notify stores at most one pending permit, so a waiter
                    // that consumes it must pass the signal along while the
                    // condition still holds for others.
                    self.item_available.notify_one();
                    if has_space {
                        self.space_available.notify_one();
                    }
                    return;
                }
            }
            self.space_available.notified().await;
        }
    }

    /// Remove and return the oldest command, awaiting while empty.
    pub async fn take(&self) -> TokenizedCommand {
        loop {
            {
                let mut queue = self.lock_queue();
                if let Some(command) = queue.pop_front() {
                    let has_items = !queue.is_empty();
                    drop(queue);
                    self.space_available.notify_one();
                    if has_items {
                        self.item_available.notify_one();
                    }
                    return command;
                }
            }
            self.item_available.notified().await;
        }
    }

    /// Advisory emptiness snapshot.
    pub fn is_empty(&self) -> bool {
        self.lock_queue().is_empty()
    }

    /// Advisory length snapshot.
    pub fn len(&self) -> usize {
        self.lock_queue().len()
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<TokenizedCommand>> {
        // A panic while holding the guard poisons the mutex; the queue
        // itself is still structurally sound, so keep going.
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
