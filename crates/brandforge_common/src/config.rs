//! Service configuration
//!
//! Everything comes from the process environment. A missing provider key is
//! a valid configuration, not an error: the capability it gates runs in
//! simulation mode instead of calling out.

use serde::{Deserialize, Serialize};

/// Default bind address for the API server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8090";

/// Default end-to-end budget for one brand kit request, in seconds.
/// Individual provider calls carry their own shorter timeouts; this bounds
/// the whole pipeline.
pub const DEFAULT_KIT_DEADLINE_SECS: u64 = 75;

/// Default Groq chat model for text generation capabilities.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    pub bind_addr: String,
    pub kit_deadline_secs: u64,

    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub stability_api_key: Option<String>,
    pub hf_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            kit_deadline_secs: DEFAULT_KIT_DEADLINE_SECS,
            groq_api_key: None,
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            stability_api_key: None,
            hf_api_key: None,
            gemini_api_key: None,
        }
    }
}

impl ForgeConfig {
    /// Load configuration from the environment. Unset and empty variables
    /// are both treated as absent.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BRANDFORGE_BIND_ADDR", DEFAULT_BIND_ADDR),
            kit_deadline_secs: std::env::var("BRANDFORGE_KIT_DEADLINE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_KIT_DEADLINE_SECS),
            groq_api_key: env_opt("GROQ_API_KEY"),
            groq_model: env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            stability_api_key: env_opt("STABILITY_API_KEY"),
            hf_api_key: env_opt("HF_API_KEY"),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
        }
    }

    /// Run with no provider keys at all: every capability simulates.
    pub fn offline() -> Self {
        Self::default()
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Normalize an optional credential: empty and whitespace-only tokens count
/// as absent.
pub fn credential(token: &Option<String>) -> Option<&str> {
    token.as_deref().map(str::trim).filter(|t| !t.is_empty())
}
