//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod storage;

pub use ai::{MockExtractor, OpenAiConfig, OpenAiExtractor};
pub use storage::{InMemoryStore, JsonFileStore};
