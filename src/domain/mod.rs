//! Domain layer - expense types and the turn-taking workflow.

pub mod expense;
pub mod foundation;
