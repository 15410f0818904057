//! In-memory expense store for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::expense::Expense;
use crate::ports::{ExpenseStore, StoreError};

/// In-memory double for the [`ExpenseStore`] port.
///
/// Optionally fails every append, for exercising the workflow's store-error
/// path.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    expenses: RwLock<Vec<Expense>>,
    fail_appends: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose appends always fail.
    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_appends.store(true, Ordering::SeqCst);
        store
    }
}

#[async_trait]
impl ExpenseStore for InMemoryStore {
    async fn append(&self, expense: Expense) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::io("injected append failure"));
        }
        self.expenses.write().await.push(expense);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self.expenses.read().await.clone())
    }
}
