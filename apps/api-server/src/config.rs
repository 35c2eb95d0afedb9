//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConfig;
use quill_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cors_origins: parse_origins(env::var("CLIENT_ORIGIN").ok().as_deref()),
        }
    }
}

/// Comma separated origin list. `*` or nothing allows every origin.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins(None).is_empty());
        assert!(parse_origins(Some("*")).is_empty());
        assert_eq!(
            parse_origins(Some("http://localhost:5173, https://quill.example")),
            vec!["http://localhost:5173", "https://quill.example"]
        );
    }
}
