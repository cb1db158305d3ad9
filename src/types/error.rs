//! Error types for the teller engine
//!
//! # Error Categories
//!
//! - **Construction-time fatal**: an invalid grammar table aborts startup
//!   ([`GrammarError`]).
//! - **Per-source aggregate**: syntax errors collected across one full parse
//!   pass and reported as a batch ([`SyntaxErrorReport`]).
//! - **Per-command recoverable**: amount validation, malformed money
//!   literals, unknown accounts, and communication failures skip only the
//!   offending command ([`AccountError`], [`MoneyError`], [`CommandError`]).
//! - **Fatal I/O**: a source read failure abandons the producer but leaves
//!   already-buffered commands valid ([`EngineError::Io`]).

use crate::types::Money;
use std::fmt;
use thiserror::Error;

/// Error constructing a [`Money`](crate::types::Money) value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The cents part of a money value must lie in 0..=99.
    #[error("cents value {cents} is outside the range 0..=99")]
    InvalidCents {
        /// The offending cents value
        cents: i64,
    },

    /// A textual money field did not parse as an integer.
    #[error("malformed money literal '{text}'")]
    Malformed {
        /// The offending text
        text: String,
    },

    /// The combined amount does not fit in the signed cent count.
    #[error("amount overflows the representable range")]
    Overflow,
}

/// Fatal error compiling a command grammar
///
/// Grammar compilation happens once, at parser construction. Any failure here
/// aborts startup; it is never a per-command condition.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// Token and command delimiters must not be whitespace characters.
    #[error("{role} delimiter {delimiter:?} must not be whitespace")]
    WhitespaceDelimiter {
        /// Which delimiter was rejected ("token" or "command")
        role: &'static str,
        /// The offending character
        delimiter: char,
    },

    /// The shape table did not assemble into a valid matchable pattern.
    #[error("grammar does not compile to a valid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A single syntax error, tagged with its origin
///
/// Recorded by the command stream parser for every candidate command that
/// fails to match the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Identifier of the source being parsed (typically the file path)
    pub source: String,

    /// 1-based line number at which the command ended
    pub line: u64,

    /// The offending command text, whitespace already stripped
    pub text: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.source, self.line, self.text)
    }
}

/// Aggregate of every syntax error found in one parse pass
///
/// The parser scans the whole source before reporting, so a single report
/// carries all of the errors for the run, in the order encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input contains {} syntax error(s)", errors.len())]
pub struct SyntaxErrorReport {
    /// The recorded errors, in scan order
    pub errors: Vec<SyntaxError>,
}

/// Failure reported by an account capability call
///
/// All of these are per-command conditions: the worker that encounters one
/// skips the command and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Deposits and withdrawals reject negative amounts before any mutation.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// A single withdrawal may not exceed the account's configured ceiling.
    #[error("withdrawal exceeds the per-transaction limit of {limit}")]
    ExcessiveAmount {
        /// The account's withdrawal ceiling
        limit: Money,
    },

    /// The call to the remote account service failed in transit.
    ///
    /// Never retried; the command is dropped.
    #[error("communication failure: {message}")]
    Communication {
        /// Description of the transport failure
        message: String,
    },
}

/// Per-command failure inside a worker
///
/// Wraps everything that can go wrong executing one tokenized command. Each
/// variant is recoverable: the worker logs it and continues with the next
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The 8-digit account number matched the grammar but is not registered.
    #[error("unknown account number {number}")]
    UnknownAccount {
        /// The unrecognized account number
        number: String,
    },

    /// The command's money fields did not form a valid amount.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The account capability rejected or failed the call.
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Top-level error for a pipeline run
#[derive(Debug, Error)]
pub enum EngineError {
    /// The command source could not be read. Fatal to the producer only;
    /// commands already buffered are still processed.
    #[error("failed to read command source '{path}': {message}")]
    Io {
        /// Path of the source that failed
        path: String,
        /// Description of the read failure
        message: String,
    },

    /// One or more commands in the source failed to match the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxErrorReport),

    /// The grammar itself failed to compile.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
