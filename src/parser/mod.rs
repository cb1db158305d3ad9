//! Parsing module
//!
//! Turns raw command text into tokenized commands:
//! - `grammar` - compiles a declarative shape table into one matchable pattern
//! - `stream` - drives the compiled grammar over a character stream
//! - `bank` - the concrete banking command language

pub mod bank;
pub mod grammar;
pub mod stream;

pub use bank::bank_grammar;
pub use grammar::CommandGrammar;
pub use stream::CommandStreamParser;
