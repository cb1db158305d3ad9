//! In-process bank account implementation
//!
//! The state of a [`BankAccount`] comprises a balance, the owner's name, the
//! unique account number, and the maximum amount that can be withdrawn in a
//! single operation. The balance is unconstrained: it can be in credit or
//! debit for an arbitrary amount.

use crate::account::AccountService;
use crate::types::{AccountError, Money};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A bank account held in this process
///
/// Each individual read or write of the balance is atomic, but sequences are
/// not: two concurrent `withdraw` calls can interleave their ceiling check
/// and their subtraction. Per-account serialization is the caller's job.
#[derive(Debug)]
pub struct BankAccount {
    balance: RwLock<Money>,
    owner: String,
    number: String,
    max_withdrawal: Money,
}

impl BankAccount {
    /// Create an account with a fixed identity
    ///
    /// # Arguments
    ///
    /// * `initial_balance` - the starting balance
    /// * `owner` - the account holder's name
    /// * `number` - the unique 8-digit account number
    /// * `max_withdrawal` - the per-transaction withdrawal ceiling
    pub fn new(
        initial_balance: Money,
        owner: impl Into<String>,
        number: impl Into<String>,
        max_withdrawal: Money,
    ) -> Self {
        BankAccount {
            balance: RwLock::new(initial_balance),
            owner: owner.into(),
            number: number.into(),
            max_withdrawal,
        }
    }

    /// The account's withdrawal ceiling.
    pub fn max_withdrawal(&self) -> Money {
        self.max_withdrawal
    }
}

#[async_trait]
impl AccountService for BankAccount {
    async fn balance(&self) -> Result<Money, AccountError> {
        // Money is Copy: the caller gets a separate value, never a handle
        // into this account's state.
        Ok(*self.balance.read().await)
    }

    async fn owner(&self) -> Result<String, AccountError> {
        Ok(self.owner.clone())
    }

    async fn number(&self) -> Result<String, AccountError> {
        Ok(self.number.clone())
    }

    async fn deposit(&self, amount: Money) -> Result<(), AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeAmount);
        }
        *self.balance.write().await += amount;
        Ok(())
    }

    async fn withdraw(&self, amount: Money) -> Result<(), AccountError> {
        if amount.is_negative() {
            return Err(AccountError::NegativeAmount);
        }
        if amount > self.max_withdrawal {
            return Err(AccountError::ExcessiveAmount {
                limit: self.max_withdrawal,
            });
        }
        *self.balance.write().await -= amount;
        Ok(())
    }
}
