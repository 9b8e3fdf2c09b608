// --- File: crates/encore_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built front-end, served in debug builds.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/contacts.db, overridable via ENCORE__DATABASE__URL
}

// --- Calendly Config ---
// Holds the Calendly proxy settings. The access token is normally the marker
// "secret_from_env" and resolved from CALENDLY_ACCESS_TOKEN.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendlyConfig {
    #[serde(default = "default_calendly_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_calendly_api_base_url() -> String {
    "https://api.calendly.com".to_string()
}

// --- Chat Config ---
// OpenAI-compatible completion endpoint. The key is resolved from CHAT_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_chat_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_chat_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_system_prompt() -> String {
    "You are the assistant of the artist's website. Answer briefly and point visitors \
     to the booking calendar or the contact form for bookings."
        .to_string()
}

// --- Scheduler (embedded widget) Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulerConfig {
    #[serde(default = "default_script_src")]
    pub script_src: String,
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    #[serde(default = "default_preferred_keyword")]
    pub preferred_keyword: String,
    #[serde(default = "default_settling_delay_ms")]
    pub settling_delay_ms: u64,
}

fn default_script_src() -> String {
    "https://assets.calendly.com/assets/external/widget.js".to_string()
}

fn default_fallback_url() -> String {
    "https://calendly.com/votre-calendly-username".to_string()
}

fn default_preferred_keyword() -> String {
    "consultation".to_string()
}

fn default_settling_delay_ms() -> u64 {
    250
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            script_src: default_script_src(),
            fallback_url: default_fallback_url(),
            preferred_keyword: default_preferred_keyword(),
            settling_delay_ms: default_settling_delay_ms(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_calendly: bool,
    #[serde(default)]
    pub use_contact: bool,
    #[serde(default)]
    pub use_chat: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub calendly: Option<CalendlyConfig>,
    #[serde(default)]
    pub chat: Option<ChatConfig>,
    #[serde(default)]
    pub scheduler: Option<SchedulerConfig>,
}
