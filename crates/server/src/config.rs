//! Server configuration

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ai::client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub max_upload_bytes: usize,
    pub llm: LlmConfig,
    pub database: DatabaseConfig,
    pub ocr: OcrConfig,
}

/// Hosted chat-completion provider settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Doctors database settings. `url` wins over the individual fields when set.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub timeout: Duration,
}

/// Text recognition settings
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub tessdata_dir: Option<PathBuf>,
    pub language: String,
    /// `sample` for the built-in report, otherwise a path to a text file
    pub fixture: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            rate_limit_rps: 100,
            max_upload_bytes: 10 * 1024 * 1024,
            llm: LlmConfig {
                api_key: None,
                api_url: DEFAULT_API_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                timeout: Duration::from_secs(60),
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: None,
                name: "ecare".to_string(),
                timeout: Duration::from_secs(10),
            },
            ocr: OcrConfig {
                tessdata_dir: None,
                language: "eng".to_string(),
                fixture: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_address: env_or("BIND_ADDRESS", defaults.bind_address),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS", defaults.rate_limit_rps),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            llm: LlmConfig {
                api_key: env_opt("HUGGINGFACE_API_KEY"),
                api_url: env_or("LLM_API_URL", defaults.llm.api_url),
                model: env_or("LLM_MODEL", defaults.llm.model),
                timeout: env_secs("LLM_TIMEOUT_SECS", defaults.llm.timeout),
            },
            database: DatabaseConfig {
                url: env_opt("DATABASE_URL"),
                host: env_or("DB_HOST", defaults.database.host),
                port: env_parse("DB_PORT", defaults.database.port),
                user: env_or("DB_USER", defaults.database.user),
                password: env_opt("DB_PASSWORD"),
                name: env_or("DB_NAME", defaults.database.name),
                timeout: env_secs("DB_TIMEOUT_SECS", defaults.database.timeout),
            },
            ocr: OcrConfig {
                tessdata_dir: env_opt("OCR_TESSDATA_DIR").map(PathBuf::from),
                language: env_or("OCR_LANGUAGE", defaults.ocr.language),
                fixture: env_opt("OCR_FIXTURE"),
            },
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: String) -> String {
    env_opt(key).unwrap_or(default)
}

fn env_parse<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

/// Timeout in whole seconds. Zero would fail every call immediately, so it
/// is treated like an invalid value.
fn env_secs(key: &str, default: Duration) -> Duration {
    nonzero_secs(key, env_parse(key, default.as_secs()), default)
}

fn nonzero_secs(key: &str, secs: u64, default: Duration) -> Duration {
    if secs == 0 {
        tracing::warn!(key, default = default.as_secs(), "Timeout must be at least 1s, using default");
        return default;
    }
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_uses_default() {
        let default = Duration::from_secs(60);
        assert_eq!(nonzero_secs("LLM_TIMEOUT_SECS", 0, default), default);
        assert_eq!(
            nonzero_secs("DB_TIMEOUT_SECS", 5, Duration::from_secs(10)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.timeout, Duration::from_secs(60));
        assert_eq!(config.database.timeout, Duration::from_secs(10));
    }
}
