//! Follow-up prompting for incomplete drafts.
//!
//! Two renderings of the same draft: a question for the user listing what is
//! still needed, and a context hint restating what is already known. The hint
//! is prepended to the next raw input so the oracle sees established facts
//! alongside the new text and does not null them out.

use crate::domain::expense::ExpenseDraft;

/// Builds the human-readable follow-up question for an incomplete draft.
///
/// Returns an empty string when nothing is missing. Otherwise:
/// `"Please provide the {missing} for the expense ({known}):"` where
/// missing field names join with " and " and known `field: value` pairs
/// join with ", " (or read "no information" when nothing is known yet).
pub fn follow_up_prompt(draft: &ExpenseDraft) -> String {
    let missing = draft.missing_fields();
    if missing.is_empty() {
        return String::new();
    }

    let missing_str = missing
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(" and ");

    let known = draft.known_fields();
    let known_str = if known.is_empty() {
        "no information".to_string()
    } else {
        known
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!("Please provide the {missing_str} for the expense ({known_str}):")
}

/// Restates the known fields in natural language for the next oracle call.
///
/// Example: `"title is Taxi, category is transport"`. Empty when nothing is
/// known yet.
pub fn context_hint(draft: &ExpenseDraft) -> String {
    draft
        .known_fields()
        .iter()
        .map(|(field, value)| format!("{} is {}", field, value))
        .collect::<Vec<_>>()
        .join(", ")
}
