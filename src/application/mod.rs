//! Application layer - use case handlers wiring domain logic to the ports.

mod submit_turn;

pub use submit_turn::{SubmitTurnError, SubmitTurnHandler, TurnResponse, RECORDED_MESSAGE};
