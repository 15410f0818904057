//! JSON file expense store.
//!
//! Persists the expense list as one pretty-printed JSON array. The append is
//! a read-modify-write of the whole file, so a mutex serializes appenders
//! within the process; the original single-user tool had no such guard.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::expense::Expense;
use crate::ports::{ExpenseStore, StoreError};

/// File-backed expense store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path.
    ///
    /// The file is created on first append; a missing file reads as an
    /// empty list.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the current list, degrading to empty when the file is missing
    /// or unreadable so an append never fails on a bad read.
    async fn read_or_empty(&self) -> Vec<Expense> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "expense file unreadable; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(expenses) => expenses,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "expense file corrupt; treating as empty");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ExpenseStore for JsonFileStore {
    async fn append(&self, expense: Expense) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut expenses = self.read_or_empty().await;
        expenses.push(expense);

        let json = serde_json::to_string_pretty(&expenses)
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::io(e.to_string()))?;
            }
        }

        fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::io(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<Expense>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(err.to_string())),
        };

        serde_json::from_str(&contents).map_err(|e| StoreError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::ExpenseDraft;
    use tempfile::TempDir;

    fn expense(title: &str, amount: f64, category: &str) -> Expense {
        Expense::try_from(ExpenseDraft {
            title: Some(title.to_string()),
            amount: Some(amount),
            category: Some(category.to_string()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn append_creates_file_and_list_reads_it_back() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("expenses.json"));

        store.append(expense("Taxi", 150.0, "transport")).await.unwrap();

        let expenses = store.list().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title, "Taxi");
    }

    #[tokio::test]
    async fn appends_accumulate_in_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("expenses.json"));

        store.append(expense("Taxi", 150.0, "transport")).await.unwrap();
        store.append(expense("Lunch", 50.0, "food")).await.unwrap();

        let expenses = store.list().await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].title, "Taxi");
        assert_eq!(expenses[1].title, "Lunch");
    }

    #[tokio::test]
    async fn list_on_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("expenses.json"));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        tokio::fs::write(&path, "{not valid json").await.unwrap();

        let store = JsonFileStore::new(&path);
        store.append(expense("Taxi", 150.0, "transport")).await.unwrap();

        let expenses = store.list().await.unwrap();
        assert_eq!(expenses.len(), 1);
    }

    #[tokio::test]
    async fn list_surfaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        tokio::fs::write(&path, "{not valid json").await.unwrap();

        let store = JsonFileStore::new(&path);

        assert!(matches!(
            store.list().await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("expenses.json")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .append(expense(&format!("Item {}", i), 1.0 + i as f64, "misc"))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn file_is_pretty_printed_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let store = JsonFileStore::new(&path);

        store.append(expense("Taxi", 150.0, "transport")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.starts_with('['));
        assert!(contents.contains('\n'));
    }
}
