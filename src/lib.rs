pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatClient, LookupExpiryUseCase, LOOKUP_TEMPERATURE};

pub use connector::{AuthScheme, ChatClientConfig, MockChatClient, OpenAiChatClient};

pub use domain::{
    ChatRequest, DomainError, ExpiryAnswer, ExpiryPrompt, ExpiryStatus, ItemName,
    GROCERY_EXPERT_INSTRUCTIONS,
};
