mod chat_client_config;
mod mock_chat_client;
mod openai_chat_client;

pub use chat_client_config::*;
pub use mock_chat_client::*;
pub use openai_chat_client::*;
