//! Value objects for the Mailsift domain

mod email_address;
mod priority_level;
mod reply_status;
mod sentiment_category;

pub use email_address::EmailAddress;
pub use priority_level::PriorityLevel;
pub use reply_status::ReplyStatus;
pub use sentiment_category::SentimentCategory;
