//! Per-session turn state machine.
//!
//! Each turn moves through AwaitingInput -> Extracting -> Complete |
//! Incomplete. The state is a plain value owned by the caller: it is handed
//! into a turn and either carried forward (incomplete) or reset (complete).
//! Nothing here touches the oracle; the caller performs the extraction and
//! feeds the resulting draft in through [`SessionState::absorb`].

use serde::{Deserialize, Serialize};

use crate::domain::expense::{context_hint, follow_up_prompt, Expense, ExpenseDraft};

/// State carried across the turns of one expense-logging session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    draft: ExpenseDraft,
    context_hint: String,
}

/// Result of absorbing one turn's extraction, one variant per terminal state.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The draft became complete; the expense is ready to persist and the
    /// session has been reset.
    Recorded(Expense),
    /// Fields are still missing; the session keeps its draft and the caller
    /// should relay the follow-up question.
    NeedsMoreInfo {
        /// Question to show the user.
        prompt: String,
    },
}

impl SessionState {
    /// Fresh state: empty draft, no context hint.
    pub fn new() -> Self {
        Self::default()
    }

    /// The draft accumulated so far.
    pub fn draft(&self) -> &ExpenseDraft {
        &self.draft
    }

    /// The hint carried from the previous turn, empty on the first turn.
    pub fn context_hint(&self) -> &str {
        &self.context_hint
    }

    /// Combines the carried context hint with this turn's raw input.
    ///
    /// The combined text is what the oracle should see, so already-known
    /// facts survive re-extraction.
    pub fn compose_input(&self, raw_text: &str) -> String {
        if self.context_hint.is_empty() {
            raw_text.to_string()
        } else {
            format!("{}. {}", self.context_hint, raw_text)
        }
    }

    /// Merges one turn's extraction into the session and decides the outcome.
    ///
    /// Complete drafts become an [`Expense`] and the state resets for the
    /// next session. Incomplete drafts are retained together with a fresh
    /// context hint for the following turn.
    pub fn absorb(&mut self, incoming: ExpenseDraft) -> TurnOutcome {
        self.draft = ExpenseDraft::merge(&self.draft, &incoming);

        match Expense::try_from(self.draft.clone()) {
            Ok(expense) => {
                *self = Self::new();
                TurnOutcome::Recorded(expense)
            }
            Err(_) => {
                let prompt = follow_up_prompt(&self.draft);
                self.context_hint = context_hint(&self.draft);
                TurnOutcome::NeedsMoreInfo { prompt }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: Option<&str>, amount: Option<f64>, category: Option<&str>) -> ExpenseDraft {
        ExpenseDraft {
            title: title.map(String::from),
            amount,
            category: category.map(String::from),
        }
    }

    #[test]
    fn first_turn_uses_raw_input_unchanged() {
        let state = SessionState::new();
        assert_eq!(state.compose_input("taxi ride home 150"), "taxi ride home 150");
    }

    #[test]
    fn incomplete_turn_retains_draft_and_builds_hint() {
        let mut state = SessionState::new();

        let outcome = state.absorb(draft(Some("Taxi"), None, Some("transport")));

        match outcome {
            TurnOutcome::NeedsMoreInfo { prompt } => {
                assert_eq!(
                    prompt,
                    "Please provide the amount for the expense (title: Taxi, category: transport):"
                );
            }
            TurnOutcome::Recorded(_) => panic!("draft was incomplete"),
        }
        assert_eq!(state.draft().title.as_deref(), Some("Taxi"));
        assert_eq!(state.context_hint(), "title is Taxi, category is transport");
        assert_eq!(
            state.compose_input("150"),
            "title is Taxi, category is transport. 150"
        );
    }

    #[test]
    fn completing_turn_records_expense_and_resets() {
        let mut state = SessionState::new();
        state.absorb(draft(Some("Taxi"), None, Some("transport")));

        let outcome = state.absorb(draft(None, Some(150.0), None));

        match outcome {
            TurnOutcome::Recorded(expense) => {
                assert_eq!(expense.title, "Taxi");
                assert_eq!(expense.amount, 150.0);
                assert_eq!(expense.category, "transport");
            }
            TurnOutcome::NeedsMoreInfo { .. } => panic!("draft was complete"),
        }
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn empty_extraction_asks_for_all_fields() {
        // An oracle failure is fed in as an empty draft; the session must
        // keep asking rather than crash.
        let mut state = SessionState::new();

        let outcome = state.absorb(ExpenseDraft::default());

        match outcome {
            TurnOutcome::NeedsMoreInfo { prompt } => {
                assert_eq!(
                    prompt,
                    "Please provide the title and amount and category for the expense (no information):"
                );
            }
            TurnOutcome::Recorded(_) => panic!("empty draft cannot complete"),
        }
        assert_eq!(state.context_hint(), "");
    }

    #[test]
    fn later_turns_never_overwrite_known_fields() {
        let mut state = SessionState::new();
        state.absorb(draft(Some("Taxi"), None, Some("transport")));

        state.absorb(draft(Some("Bus"), None, None));

        assert_eq!(state.draft().title.as_deref(), Some("Taxi"));
    }

    #[test]
    fn single_turn_can_complete_a_session() {
        let mut state = SessionState::new();

        let outcome = state.absorb(draft(Some("Lunch"), Some(50.0), Some("food")));

        assert!(matches!(outcome, TurnOutcome::Recorded(_)));
        assert_eq!(state, SessionState::new());
    }
}
