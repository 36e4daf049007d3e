mod admin;
mod error;
mod forwarding;
mod settings;

pub use admin::{AdminClient, WebhookSecurityDraft};
pub use error::SettingsError;
pub use forwarding::{ForwardingGuide, FORWARDING_GUIDES, FORWARDING_TIPS};
pub use settings::{mailbox_address_line, SettingToggle, SettingsClient, SettingsUpdate};
