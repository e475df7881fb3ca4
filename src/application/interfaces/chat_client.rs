use async_trait::async_trait;

use crate::domain::{ChatRequest, DomainError};

/// An interface for sending a chat-style prompt to an LLM and receiving text back.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. [`crate::application::LookupExpiryUseCase`]) remain
/// decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the request and return the text of the first reply, untrimmed.
    ///
    /// Exactly one remote call per invocation; implementations must not retry.
    async fn complete(&self, request: &ChatRequest) -> Result<String, DomainError>;
}
