//! Persistence sink port.

use async_trait::async_trait;

use crate::domain::expense::Expense;

/// Port for appending completed expenses to a durable list.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Appends one expense to the list.
    ///
    /// Implementations must serialize appends relative to each other; a
    /// missing or corrupt backing store is treated as an empty collection
    /// rather than a failure.
    async fn append(&self, expense: Expense) -> Result<(), StoreError>;

    /// Returns all recorded expenses, oldest first.
    async fn list(&self) -> Result<Vec<Expense>, StoreError>;
}

/// Persistence errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Record could not be serialized or the stored list deserialized.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
