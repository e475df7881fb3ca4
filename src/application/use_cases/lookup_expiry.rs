use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{
    ChatRequest, DomainError, ExpiryAnswer, ExpiryPrompt, ItemName, GROCERY_EXPERT_INSTRUCTIONS,
};

/// Sampling temperature for expiry lookups; low to keep answers close to a bare date.
pub const LOOKUP_TEMPERATURE: f32 = 0.3;

/// Asks the chat model for the expiry date of a grocery item bought today.
///
/// Each call to [`execute`](Self::execute) issues exactly one request through
/// the injected [`ChatClient`]. Nothing is retried or cached, so repeated calls
/// for the same item may return different text.
pub struct LookupExpiryUseCase {
    chat_client: Arc<dyn ChatClient>,
    today: Option<NaiveDate>,
}

impl LookupExpiryUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            today: None,
        }
    }

    /// Pin the purchase date instead of reading the local calendar.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The purchase date the prompt will use.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub async fn execute(&self, item_name: &str) -> Result<ExpiryAnswer, DomainError> {
        let item = ItemName::new(item_name)?;
        let prompt = ExpiryPrompt::new(&item, self.today());

        let request = ChatRequest::new(prompt.into_text())
            .with_system(GROCERY_EXPERT_INSTRUCTIONS)
            .with_temperature(LOOKUP_TEMPERATURE);

        debug!("Looking up expiry date for '{}'", item);
        let raw = self.chat_client.complete(&request).await?;
        debug!("Raw model answer for '{}': {:?}", item, raw);

        Ok(ExpiryAnswer::new(raw))
    }
}
