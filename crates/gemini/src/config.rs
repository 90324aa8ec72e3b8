use std::time::Duration;

/// Gemini connection settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL up to and including the API version, without trailing slash.
    pub api_url: String,
    /// Model used for analysis and suggestions.
    pub text_model: String,
    /// Model used for image cleanup and outfit rendering.
    pub image_model: String,
    /// Per-request client timeout.
    pub timeout: Duration,
}

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const DEFAULT_TIMEOUT_SECS: u64 = 90;

impl GeminiConfig {
    /// Settings with default models and timeout.
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                                            |
    /// |-----------------------|----------------------------------------------------|
    /// | `GEMINI_API_KEY`      | falls back to `API_KEY`, required                  |
    /// | `GEMINI_API_URL`      | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GEMINI_TEXT_MODEL`   | `gemini-2.5-flash`                                 |
    /// | `GEMINI_IMAGE_MODEL`  | `gemini-2.5-flash-image`                           |
    /// | `GEMINI_TIMEOUT_SECS` | `90`                                               |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .expect("GEMINI_API_KEY (or API_KEY) must be set");

        let api_url = std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GEMINI_TIMEOUT_SECS must be a valid u64");

        let mut config = Self::new(api_key, api_url);
        if let Ok(model) = std::env::var("GEMINI_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Ok(model) = std::env::var("GEMINI_IMAGE_MODEL") {
            config.image_model = model;
        }
        config.timeout = Duration::from_secs(timeout_secs);
        config
    }
}
