//! Tokenized command representation
//!
//! A command that has matched the grammar is carried through the pipeline as
//! its ordered token strings: `[verb, account_number, ...fields]`. No command
//! with unmatched syntax ever reaches this form.

/// A grammar-matched command, split into its token strings
///
/// The first token is the verb, the second the 8-digit account number;
/// money-bearing commands carry a dollars token and a cents token after that.
pub type TokenizedCommand = Vec<String>;

/// The command verbs the banking grammar defines
///
/// Only `deposit` and `withdraw` mutate account state; the others are
/// accepted and ignored by the workers.
pub mod verbs {
    /// Query an account owner's name (accepted, no-op).
    pub const NAME: &str = "name";

    /// Query an account balance (accepted, no-op).
    pub const BALANCE: &str = "balance";

    /// Credit an amount to an account.
    pub const DEPOSIT: &str = "deposit";

    /// Debit an amount from an account, subject to the withdrawal ceiling.
    pub const WITHDRAW: &str = "withdraw";
}
