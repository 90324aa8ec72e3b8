use std::path::PathBuf;

use khizana_core::category::Categorizer;
use khizana_core::error::CoreError;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Covers the gateway
    /// round trip of the generating endpoints.
    pub request_timeout_secs: u64,
    /// Request body limit in bytes (default: 20 MiB). Uploads arrive as
    /// base64 data URLs.
    pub max_body_bytes: usize,
    /// JSON keyword table replacing the built-in categorization rules.
    pub category_rules_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    /// | `MAX_BODY_BYTES`       | `20971520`                 |
    /// | `CATEGORY_RULES_PATH`  | unset (built-in keywords)  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| "20971520".into())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let category_rules_path = std::env::var("CATEGORY_RULES_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            category_rules_path,
        }
    }

    /// The categorizer to use: the configured rule file, or the built-in
    /// bilingual keyword table.
    pub fn load_categorizer(&self) -> Result<Categorizer, CoreError> {
        let Some(path) = &self.category_rules_path else {
            return Ok(Categorizer::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!(
                "Failed to read category rules from {}: {e}",
                path.display()
            ))
        })?;
        Categorizer::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use assert_matches::assert_matches;
    use khizana_core::category::Category;

    use super::*;

    fn config_with_rules(path: Option<PathBuf>) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            max_body_bytes: 1024,
            category_rules_path: path,
        }
    }

    #[test]
    fn without_rules_path_uses_builtin_table() {
        let categorizer = config_with_rules(None).load_categorizer().unwrap();
        assert_eq!(categorizer.categorize("قميص"), Some(Category::Tops));
    }

    #[test]
    fn rules_file_replaces_builtin_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tops": ["camisa"], "bottoms": ["pantalón"]}}"#).unwrap();

        let categorizer = config_with_rules(Some(file.path().to_path_buf()))
            .load_categorizer()
            .unwrap();

        assert_eq!(categorizer.categorize("Camisa blanca"), Some(Category::Tops));
        assert_eq!(categorizer.categorize("قميص"), None);
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let config = config_with_rules(Some(PathBuf::from("/nonexistent/rules.json")));
        assert_matches!(config.load_categorizer(), Err(CoreError::Internal(_)));
    }
}
