//! # Teller Engine
//!
//! A concurrent bank-transaction engine. One producer task parses a
//! delimited command file against a compiled grammar and submits tokenized
//! commands into a bounded buffer; a pool of worker tasks drains the buffer
//! and applies deposits and withdrawals to accounts, with a per-account
//! lock table serializing commands that touch the same account.
//!
//! ## Architecture
//!
//! - [`types`] - money arithmetic, tokenized commands, and the error taxonomy
//! - [`parser`] - the grammar compiler and the command stream parser
//! - [`account`] - the account capability trait, its in-process servant, and
//!   the registry
//! - [`pipeline`] - buffer, lock table, producer, worker pool, drain
//!   coordination, and the [`Pipeline`](pipeline::Pipeline) orchestrator
//! - [`cli`] - command-line argument handling
//!
//! ## Shutdown protocol
//!
//! The pipeline never cancels a worker while work remains: it waits for the
//! producer, waits for the buffer to observe empty, then cancels the pool.
//! Workers only notice cancellation between commands, so every dequeued
//! command runs to completion.

pub mod account;
pub mod cli;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use account::{AccountRegistry, AccountService, BankAccount};
pub use parser::{bank_grammar, CommandGrammar, CommandStreamParser};
pub use pipeline::{Pipeline, PipelineConfig, RunSummary};
pub use types::{EngineError, Money};
