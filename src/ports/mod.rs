//! Ports - interfaces to external collaborators.
//!
//! The extraction oracle and the persistence sink live outside the workflow;
//! adapters implement these traits so the turn logic stays testable with
//! deterministic doubles.

mod expense_store;
mod extractor;

pub use expense_store::{ExpenseStore, StoreError};
pub use extractor::{ExpenseExtractor, ExtractionError};
