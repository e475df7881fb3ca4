use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{ChatRequest, DomainError};

type ErrorFactory = Box<dyn Fn() -> DomainError + Send + Sync>;

enum Outcome {
    Reply(String),
    Fail(ErrorFactory),
}

/// In-process [`ChatClient`] that answers every request with the same canned
/// reply (or error) and remembers what it was asked.
pub struct MockChatClient {
    outcome: Outcome,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Reply(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with the error produced by `make_error`.
    pub fn with_error<F>(make_error: F) -> Self
    where
        F: Fn() -> DomainError + Send + Sync + 'static,
    {
        Self {
            outcome: Outcome::Fail(Box::new(make_error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, DomainError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match &self.outcome {
            Outcome::Reply(reply) => {
                debug!("MockChatClient answering with canned reply");
                Ok(reply.clone())
            }
            Outcome::Fail(make_error) => Err(make_error()),
        }
    }
}
