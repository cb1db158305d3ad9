//! The remote account capability
//!
//! Workers depend only on this trait's signatures, never on how a particular
//! account is reached. An implementation may live in-process (see
//! [`BankAccount`](crate::account::BankAccount)) or proxy a remote service;
//! either way every call is fallible, because the transport can fail at any
//! time.

use crate::types::{AccountError, Money};
use async_trait::async_trait;

/// A named, numbered account reachable through fallible calls
///
/// Amount validation lives behind this interface: `deposit` and `withdraw`
/// reject invalid amounts before mutating anything. What does *not* live
/// here is sequencing — the check-ceiling-then-subtract sequence inside
/// `withdraw` is not atomic with respect to other callers, so callers that
/// need per-account serialization must hold the account's exclusive lock
/// across the call (see [`LockTable`](crate::pipeline::LockTable)).
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Returns an independent copy of the current balance.
    async fn balance(&self) -> Result<Money, AccountError>;

    /// Returns the account owner's name.
    async fn owner(&self) -> Result<String, AccountError>;

    /// Returns the account's unique 8-digit number.
    async fn number(&self) -> Result<String, AccountError>;

    /// Credits `amount` to the account
    ///
    /// # Errors
    ///
    /// [`AccountError::NegativeAmount`] if `amount` is negative; the balance
    /// is unchanged. [`AccountError::Communication`] if the call fails in
    /// transit.
    async fn deposit(&self, amount: Money) -> Result<(), AccountError>;

    /// Debits `amount` from the account
    ///
    /// The balance is allowed to go negative; there is no overdraft check.
    ///
    /// # Errors
    ///
    /// [`AccountError::NegativeAmount`] if `amount` is negative, or
    /// [`AccountError::ExcessiveAmount`] if it exceeds the account's
    /// per-transaction ceiling; in both cases the balance is unchanged.
    /// [`AccountError::Communication`] if the call fails in transit.
    async fn withdraw(&self, amount: Money) -> Result<(), AccountError>;
}
