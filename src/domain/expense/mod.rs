//! Expense domain: drafts, completed records, follow-up prompting and the
//! per-turn state machine.

mod draft;
mod followup;
mod record;
mod session;

pub use draft::{ExpenseDraft, Field};
pub use followup::{context_hint, follow_up_prompt};
pub use record::{Expense, IncompleteDraft};
pub use session::{SessionState, TurnOutcome};
