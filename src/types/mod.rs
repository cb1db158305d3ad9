//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `money`: fixed-point currency value type
//! - `command`: tokenized command representation and verb constants
//! - `error`: the full error taxonomy for the engine

pub mod command;
pub mod error;
pub mod money;

pub use command::TokenizedCommand;
pub use error::{
    AccountError, CommandError, EngineError, GrammarError, MoneyError, SyntaxError,
    SyntaxErrorReport,
};
pub use money::Money;
