use crate::services::gemini::DEFAULT_API_BASE;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub bind_addr: String,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let google_api_key = lookup("GOOGLE_API_KEY").unwrap_or_default();
        if google_api_key.is_empty() {
            // Not fatal: the first Gemini call reports the auth failure.
            log::warn!("⚠️ GOOGLE_API_KEY not set, Gemini requests will be rejected");
        }

        Self {
            google_api_key,
            gemini_model: get("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base: get("GEMINI_API_BASE", DEFAULT_API_BASE),
            bind_addr: get("BIND_ADDR", DEFAULT_BIND_ADDR),
            static_dir: get("STATIC_DIR", DEFAULT_STATIC_DIR),
        }
    }
}
