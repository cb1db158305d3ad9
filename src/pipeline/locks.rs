//! Per-account lock table
//!
//! One async mutex per account, keyed at startup from the registry's
//! account numbers. Workers acquire the account's lock before touching the
//! account, which serializes the check-then-mutate sequence of a withdrawal
//! against every other command on the same account while leaving commands
//! on different accounts free to run in parallel.
//!
//! The table is read-only after construction: lookups never lock the map
//! itself, only the per-account mutex they return.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Startup-keyed map from account number to its serialization lock
#[derive(Debug, Default)]
pub struct LockTable {
    locks: HashMap<String, Arc<Mutex<()>>>,
}

impl LockTable {
    /// Build a table with one lock per account number.
    pub fn new(account_numbers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        LockTable {
            locks: account_numbers
                .into_iter()
                .map(|number| (number.into(), Arc::new(Mutex::new(()))))
                .collect(),
        }
    }

    /// The lock guarding the given account, or `None` for an unknown number.
    pub fn lock_for(&self, account_number: &str) -> Option<Arc<Mutex<()>>> {
        self.locks.get(account_number).cloned()
    }

    /// Number of accounts covered by the table.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// True if the table covers no accounts.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_account_has_a_lock() {
        let table = LockTable::new(["11111111", "22222222"]);
        assert_eq!(table.len(), 2);
        assert!(table.lock_for("11111111").is_some());
        assert!(table.lock_for("22222222").is_some());
    }

    #[test]
    fn test_unknown_account_has_no_lock() {
        let table = LockTable::new(["11111111"]);
        assert!(table.lock_for("99999999").is_none());
    }

    #[test]
    fn test_lookups_return_the_same_lock() {
        let table = LockTable::new(["11111111"]);
        let a = table.lock_for("11111111").unwrap();
        let b = table.lock_for("11111111").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_lock_excludes_second_holder() {
        let table = LockTable::new(["11111111"]);
        let lock = table.lock_for("11111111").unwrap();

        let guard = lock.lock().await;
        assert!(lock.try_lock().is_err());
        drop(guard);
        assert!(lock.try_lock().is_ok());
    }
}
