//! Mock extraction oracle for testing.
//!
//! Configurable double for the [`ExpenseExtractor`] port: queue up drafts or
//! errors, optionally simulate latency, and inspect the texts the workflow
//! actually sent.
//!
//! # Example
//!
//! ```ignore
//! let extractor = MockExtractor::new()
//!     .with_draft(ExpenseDraft { title: Some("Taxi".into()), ..Default::default() })
//!     .with_error(ExtractionError::network("connection reset"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::expense::ExpenseDraft;
use crate::ports::{ExpenseExtractor, ExtractionError};

/// Mock extraction oracle.
///
/// Responses are consumed in order; once exhausted, every call returns an
/// empty draft.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<ExpenseDraft, ExtractionError>>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Texts this extractor was called with, for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockExtractor {
    /// Creates a new mock with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful extraction.
    pub fn with_draft(self, draft: ExpenseDraft) -> Self {
        self.responses.lock().unwrap().push_back(Ok(draft));
        self
    }

    /// Queues an extraction failure.
    pub fn with_error(self, error: ExtractionError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the texts this extractor was called with, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExpenseExtractor for MockExtractor {
    async fn extract(&self, text: &str) -> Result<ExpenseDraft, ExtractionError> {
        self.calls.lock().unwrap().push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ExpenseDraft::default()))
    }
}
