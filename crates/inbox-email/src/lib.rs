mod alert;
mod client;
mod error;

pub use alert::SpamAlert;
pub use client::{normalize_spam_list, EmailClient, NewEmail};
pub use error::EmailError;
