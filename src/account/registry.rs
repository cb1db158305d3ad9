//! Account registry
//!
//! An explicitly constructed table of the accounts a run operates on, keyed
//! by account number. The registry is built once at startup (from whatever
//! discovery mechanism the bootstrap uses) and handed to the pipeline by
//! reference; it is read-only from then on, so it needs no synchronization
//! of its own.

use crate::account::AccountService;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from account number to account capability
#[derive(Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Arc<dyn AccountService>>,
}

impl AccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account under its number
    ///
    /// Intended for use during startup only; the pipeline assumes the
    /// account set is fixed before workers begin.
    pub fn insert(&mut self, number: impl Into<String>, account: Arc<dyn AccountService>) {
        self.accounts.insert(number.into(), account);
    }

    /// Look up an account capability by number
    ///
    /// # Returns
    ///
    /// A cloned handle to the account, or `None` for an unknown number.
    pub fn get(&self, number: &str) -> Option<Arc<dyn AccountService>> {
        self.accounts.get(number).cloned()
    }

    /// Iterate over the registered account numbers.
    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True if no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::BankAccount;
    use crate::types::Money;

    fn registry_with(numbers: &[&str]) -> AccountRegistry {
        let mut registry = AccountRegistry::new();
        for number in numbers {
            let account = BankAccount::new(
                Money::ZERO,
                format!("Owner {number}"),
                *number,
                Money::from_dollars(100),
            );
            registry.insert(*number, Arc::new(account));
        }
        registry
    }

    #[test]
    fn test_lookup_by_number() {
        let registry = registry_with(&["12345678", "87654321"]);
        assert!(registry.get("12345678").is_some());
        assert!(registry.get("87654321").is_some());
        assert!(registry.get("00000000").is_none());
    }

    #[test]
    fn test_numbers_lists_every_account() {
        let registry = registry_with(&["12345678", "87654321"]);
        let mut numbers: Vec<&str> = registry.numbers().collect();
        numbers.sort_unstable();
        assert_eq!(numbers, vec!["12345678", "87654321"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = AccountRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
