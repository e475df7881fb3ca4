use chrono::NaiveDate;

use super::ItemName;

/// Instruction sent as the system message of every lookup.
pub const GROCERY_EXPERT_INSTRUCTIONS: &str =
    "You are a grocery expert who knows the shelf life of food items.";

/// The user prompt asking the model for an item's expiry date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryPrompt {
    text: String,
}

impl ExpiryPrompt {
    /// Build the prompt for `item`, assuming it was bought on `purchased_on`.
    pub fn new(item: &ItemName, purchased_on: NaiveDate) -> Self {
        let text = format!(
            "Find the general expiry date for the grocery item '{item}'. \
             Assuming the item is purchased today ({today}), provide the expiry date \
             in the format YYYY-MM-DD.",
            item = item.as_str(),
            today = purchased_on.format("%Y-%m-%d"),
        );
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
