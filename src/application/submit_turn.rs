//! SubmitTurn handler.
//!
//! Processes exactly one user turn for a session: compose the oracle input
//! from the carried context hint, extract, merge, then either persist the
//! completed expense or relay the follow-up question. Session state lives in
//! a per-handler map so independent sessions never share drafts.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::expense::{ExpenseDraft, SessionState, TurnOutcome};
use crate::domain::foundation::SessionId;
use crate::ports::{ExpenseExtractor, ExpenseStore, StoreError};

/// Confirmation shown when an expense lands in the store.
pub const RECORDED_MESSAGE: &str = "✓ Expense recorded successfully!";

/// What the host shows the user after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResponse {
    /// Confirmation or follow-up question.
    pub message: String,
    /// True when the expense was recorded and the session is finished.
    pub session_complete: bool,
}

/// Errors a turn can surface.
///
/// Extraction failures never appear here; they are downgraded to an empty
/// draft so the session keeps going.
#[derive(Debug, Error)]
pub enum SubmitTurnError {
    /// The completed expense could not be persisted.
    #[error("failed to persist expense: {0}")]
    Store(#[from] StoreError),
}

/// Handles user turns across any number of concurrent sessions.
pub struct SubmitTurnHandler {
    extractor: Arc<dyn ExpenseExtractor>,
    store: Arc<dyn ExpenseStore>,
    sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl SubmitTurnHandler {
    /// Creates a handler over the given oracle and sink.
    pub fn new(extractor: Arc<dyn ExpenseExtractor>, store: Arc<dyn ExpenseStore>) -> Self {
        Self {
            extractor,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Processes one turn of one session.
    ///
    /// Unknown session ids start a fresh session. The turn is terminal for
    /// the session when the response says `session_complete`; otherwise the
    /// caller feeds the next user input under the same id.
    #[tracing::instrument(skip_all, fields(session_id = %session_id))]
    pub async fn submit_turn(
        &self,
        session_id: SessionId,
        raw_text: &str,
    ) -> Result<TurnResponse, SubmitTurnError> {
        // Take the state out of the map so the oracle call does not hold the
        // lock and stall other sessions.
        let mut state = self
            .sessions
            .lock()
            .await
            .remove(&session_id)
            .unwrap_or_default();

        let input = state.compose_input(raw_text);

        let draft = match self.extractor.extract(&input).await {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(error = %err, "extraction failed; continuing with empty draft");
                ExpenseDraft::default()
            }
        };

        match state.absorb(draft) {
            TurnOutcome::Recorded(expense) => {
                tracing::info!(title = %expense.title, amount = expense.amount, "expense complete; persisting");
                self.store.append(expense).await?;
                Ok(TurnResponse {
                    message: RECORDED_MESSAGE.to_string(),
                    session_complete: true,
                })
            }
            TurnOutcome::NeedsMoreInfo { prompt } => {
                self.sessions.lock().await.insert(session_id, state);
                Ok(TurnResponse {
                    message: prompt,
                    session_complete: false,
                })
            }
        }
    }

    /// Discards a session's carried state, if any.
    ///
    /// Used when the user abandons an expense mid-conversation; nothing is
    /// persisted.
    pub async fn abort_session(&self, session_id: SessionId) {
        self.sessions.lock().await.remove(&session_id);
    }
}
