//! Extraction oracle adapters.

mod mock_extractor;
mod openai_extractor;

pub use mock_extractor::MockExtractor;
pub use openai_extractor::{OpenAiConfig, OpenAiExtractor};
