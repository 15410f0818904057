//! Expense draft - the partial record built up across turns.
//!
//! A draft starts empty and gains fields as the extraction oracle finds them.
//! Presence follows the all-truthy policy of the original assistant: an empty
//! string or a zero amount counts as missing. That makes a legitimately free
//! item (amount 0) re-prompt for the amount; kept deliberately rather than
//! silently changed, see DESIGN.md.

use serde::{Deserialize, Serialize};

/// The three fields an expense record requires, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Amount,
    Category,
}

impl Field {
    /// All required fields, in the fixed order used by prompts.
    pub const ALL: [Field; 3] = [Field::Title, Field::Amount, Field::Category];

    /// Lowercase name as it appears in user-facing prompts.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Amount => "amount",
            Field::Category => "category",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Partially extracted expense.
///
/// All fields are optional and taken as-is from the oracle; no validation or
/// coercion happens here. Drafts are only ever mutated through [`merge`].
///
/// [`merge`]: ExpenseDraft::merge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// The item or service purchased.
    #[serde(default)]
    pub title: Option<String>,
    /// The cost as a number, without currency symbols.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The type of expense (e.g. food, transport, entertainment).
    #[serde(default)]
    pub category: Option<String>,
}

impl ExpenseDraft {
    /// Combines a new extraction with an existing draft.
    ///
    /// Per field, the existing value wins when present; the incoming value
    /// fills blanks. Present fields are never overwritten, so completeness
    /// is monotonic under merge.
    pub fn merge(existing: &ExpenseDraft, incoming: &ExpenseDraft) -> ExpenseDraft {
        ExpenseDraft {
            title: if existing.has_title() {
                existing.title.clone()
            } else {
                incoming.title.clone()
            },
            amount: if existing.has_amount() {
                existing.amount
            } else {
                incoming.amount
            },
            category: if existing.has_category() {
                existing.category.clone()
            } else {
                incoming.category.clone()
            },
        }
    }

    /// True if the title is present and non-empty.
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// True if the amount is present and non-zero.
    pub fn has_amount(&self) -> bool {
        self.amount.is_some_and(|a| a != 0.0)
    }

    /// True if the category is present and non-empty.
    pub fn has_category(&self) -> bool {
        self.category.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// True if all required fields are present.
    pub fn is_complete(&self) -> bool {
        self.has_title() && self.has_amount() && self.has_category()
    }

    /// The fields still missing, in the fixed [title, amount, category] order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.has_field(*field))
            .collect()
    }

    /// The fields already known, with display values, in the fixed order.
    pub fn known_fields(&self) -> Vec<(Field, String)> {
        let mut known = Vec::new();
        if self.has_title() {
            known.push((Field::Title, self.title.clone().unwrap_or_default()));
        }
        if let Some(amount) = self.amount.filter(|_| self.has_amount()) {
            known.push((Field::Amount, format_amount(amount)));
        }
        if self.has_category() {
            known.push((Field::Category, self.category.clone().unwrap_or_default()));
        }
        known
    }

    fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Title => self.has_title(),
            Field::Amount => self.has_amount(),
            Field::Category => self.has_category(),
        }
    }
}

/// Formats an amount for prompts: whole numbers drop the decimal point.
pub(crate) fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}
