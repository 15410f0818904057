//! Shared value objects used across the domain.

mod ids;
mod timestamp;

pub use ids::SessionId;
pub use timestamp::Timestamp;
