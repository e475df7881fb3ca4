mod chat_request;
mod expiry_answer;
mod expiry_prompt;
mod item_name;

pub use chat_request::*;
pub use expiry_answer::*;
pub use expiry_prompt::*;
pub use item_name::*;
