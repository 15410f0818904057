//! Completed expense record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::expense::{ExpenseDraft, Field};
use crate::domain::foundation::Timestamp;

/// A completed, persistable expense.
///
/// Created only from a draft that has all required fields; immutable once
/// created. Its lifecycle ends at persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The item or service purchased.
    pub title: String,
    /// The cost, without currency symbols.
    pub amount: f64,
    /// The type of expense.
    pub category: String,
    /// When the record was completed.
    pub recorded_at: Timestamp,
}

/// Error produced when trying to complete a draft that still has gaps.
#[derive(Debug, Clone, Error)]
#[error("draft is missing required fields: {}", .missing.iter().map(Field::name).collect::<Vec<_>>().join(", "))]
pub struct IncompleteDraft {
    /// The fields still absent, in prompt order.
    pub missing: Vec<Field>,
}

impl TryFrom<ExpenseDraft> for Expense {
    type Error = IncompleteDraft;

    fn try_from(draft: ExpenseDraft) -> Result<Self, Self::Error> {
        if !draft.is_complete() {
            return Err(IncompleteDraft {
                missing: draft.missing_fields(),
            });
        }

        // is_complete guarantees all three fields are present and truthy.
        Ok(Expense {
            title: draft.title.unwrap_or_default(),
            amount: draft.amount.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            recorded_at: Timestamp::now(),
        })
    }
}
