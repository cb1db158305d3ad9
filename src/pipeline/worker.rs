//! Worker pool
//!
//! A fixed set of tasks that drain the command buffer and apply commands to
//! accounts. Each worker loops on take-execute; per-command failures are
//! logged and swallowed so one bad command never stalls the pipeline.
//!
//! Serialization: before touching an account the worker acquires that
//! account's lock from the [`LockTable`] and holds it across the whole call,
//! so commands on the same account execute one at a time while commands on
//! different accounts proceed in parallel.
//!
//! Shutdown is cooperative. Workers only observe cancellation while parked
//! between commands; a command already dequeued always runs to completion,
//! which together with the drain protocol guarantees no buffered command is
//! abandoned.

use crate::account::AccountRegistry;
use crate::pipeline::{CommandBuffer, LockTable};
use crate::types::command::verbs;
use crate::types::{CommandError, Money, TokenizedCommand};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// What executing one command amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    /// The command mutated (or attempted to mutate) an account.
    Applied,
    /// The verb is accepted by the grammar but carries no action.
    Ignored,
}

/// Per-worker execution tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Commands dequeued by this worker (includes failed and ignored)
    pub processed: u64,

    /// Commands that failed execution and were skipped
    pub failed: u64,

    /// Commands accepted but defined as no-ops
    pub ignored: u64,
}

impl WorkerReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: WorkerReport) {
        self.processed += other.processed;
        self.failed += other.failed;
        self.ignored += other.ignored;
    }
}

/// A running pool of worker tasks plus its cancellation handle
pub struct WorkerPool {
    handles: Vec<JoinHandle<WorkerReport>>,
    cancel: CancellationToken,
}

impl WorkerPool {
    /// Spawn `count` workers draining `buffer` against `registry`
    ///
    /// A zero count is clamped to one; a pool with no workers would never
    /// drain the buffer.
    pub fn spawn(
        count: usize,
        buffer: Arc<CommandBuffer>,
        registry: Arc<AccountRegistry>,
        locks: Arc<LockTable>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let handles = (0..count.max(1))
            .map(|id| {
                let buffer = Arc::clone(&buffer);
                let registry = Arc::clone(&registry);
                let locks = Arc::clone(&locks);
                let cancel = cancel.clone();
                tokio::spawn(worker_loop(id, buffer, registry, locks, cancel))
            })
            .collect();

        WorkerPool { handles, cancel }
    }

    /// Number of workers in the pool.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if the pool holds no workers.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancel every worker and collect their reports
    ///
    /// Callers must ensure the buffer is drained first if no command is to
    /// be left behind; cancellation itself does not wait for that.
    pub async fn shutdown(self) -> Vec<WorkerReport> {
        self.cancel.cancel();

        let mut reports = Vec::with_capacity(self.handles.len());
        for (id, outcome) in futures::future::join_all(self.handles)
            .await
            .into_iter()
            .enumerate()
        {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => error!(worker = id, error = %e, "worker task failed to join"),
            }
        }
        reports
    }
}

/// One worker's take-execute loop
///
/// The select is the only cancellation point: a dequeued command always
/// executes before the token is observed again.
async fn worker_loop(
    id: usize,
    buffer: Arc<CommandBuffer>,
    registry: Arc<AccountRegistry>,
    locks: Arc<LockTable>,
    cancel: CancellationToken,
) -> WorkerReport {
    let mut report = WorkerReport::default();

    loop {
        let command = tokio::select! {
            command = buffer.take() => command,
            _ = cancel.cancelled() => break,
        };

        report.processed += 1;
        match execute(&command, &registry, &locks).await {
            Ok(CommandOutcome::Applied) => {}
            Ok(CommandOutcome::Ignored) => report.ignored += 1,
            Err(e) => {
                report.failed += 1;
                warn!(worker = id, command = ?command, error = %e, "command failed");
            }
        }
    }

    debug!(
        worker = id,
        processed = report.processed,
        failed = report.failed,
        ignored = report.ignored,
        "worker stopped"
    );
    report
}

/// Execute one tokenized command against its account
///
/// Resolves the account and its lock, then holds the lock for the duration
/// of the account call. Commands whose verb queries rather than mutates are
/// resolved but not acted on.
async fn execute(
    command: &TokenizedCommand,
    registry: &AccountRegistry,
    locks: &LockTable,
) -> Result<CommandOutcome, CommandError> {
    let verb = command.first().map(String::as_str).unwrap_or_default();
    let number = command.get(1).map(String::as_str).unwrap_or_default();

    let account = registry.get(number).ok_or_else(|| CommandError::UnknownAccount {
        number: number.to_string(),
    })?;
    let lock = locks.lock_for(number).ok_or_else(|| CommandError::UnknownAccount {
        number: number.to_string(),
    })?;

    let _guard = lock.lock().await;
    match verb {
        verbs::DEPOSIT => {
            account.deposit(amount_of(command)?).await?;
            Ok(CommandOutcome::Applied)
        }
        verbs::WITHDRAW => {
            account.withdraw(amount_of(command)?).await?;
            Ok(CommandOutcome::Applied)
        }
        other => {
            // `name` and `balance` are accepted by the grammar but have no
            // effect on engine state.
            debug!(verb = other, account = number, "ignoring query command");
            Ok(CommandOutcome::Ignored)
        }
    }
}

/// The money amount carried in tokens 2 and 3.
fn amount_of(command: &TokenizedCommand) -> Result<Money, CommandError> {
    let (dollars, cents) = match (command.get(2), command.get(3)) {
        (Some(dollars), Some(cents)) => (dollars.as_str(), cents.as_str()),
        _ => {
            return Err(crate::types::MoneyError::Malformed {
                text: command.join(","),
            }
            .into())
        }
    };
    Ok(Money::from_strs(dollars, cents)?)
}
