//! Runtime feature checks.
//!
//! Features are gated twice: at compile time through the backend's cargo
//! features (`calendly`, `contact`, `chat`) and at runtime through the
//! `use_*` flags in [`AppConfig`]. A runtime feature is on only when its flag
//! is set and its configuration section is present.

use encore_config::AppConfig;

/// Check if a feature is enabled at runtime based on its flag and section.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// The Calendly proxy needs its section for the API base URL and token.
pub fn is_calendly_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_calendly, config.calendly.as_ref())
}

/// The contact form persists submissions, so it needs the database section.
pub fn is_contact_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_contact, config.database.as_ref())
}

pub fn is_chat_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_chat, config.chat.as_ref())
}
