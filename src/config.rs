use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::types::{AppError, AppResult};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
/// 200 MiB request body ceiling
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub google_api_key: String,
    pub model: String,
    pub api_base: String,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

// Keeps the key out of startup logs
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("google_api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_api_key = var("GOOGLE_API_KEY")
            .ok_or_else(|| AppError::Config("GOOGLE_API_KEY must be set".to_string()))?;

        Ok(Self {
            server: ServerConfig {
                port: parse_or("PORT", var("PORT"), 3000)?,
                host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                cors_allowed_origins: var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_upload_bytes: parse_or(
                    "MAX_UPLOAD_BYTES",
                    var("MAX_UPLOAD_BYTES"),
                    DEFAULT_MAX_UPLOAD_BYTES,
                )?,
            },
            llm: LLMConfig {
                google_api_key,
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: var("GEMINI_API_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                max_output_tokens: parse_opt("GEMINI_MAX_OUTPUT_TOKENS", var("GEMINI_MAX_OUTPUT_TOKENS"))?,
                temperature: parse_opt("GEMINI_TEMPERATURE", var("GEMINI_TEMPERATURE"))?,
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> AppResult<T> {
    Ok(parse_opt(key, raw)?.unwrap_or(default))
}

fn parse_opt<T: FromStr>(key: &str, raw: Option<String>) -> AppResult<Option<T>> {
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, value)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GOOGLE_API_KEY", "key-123")])).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.llm.api_base, DEFAULT_GEMINI_API_BASE);
        assert!(config.llm.max_output_tokens.is_none());
        assert!(config.llm.temperature.is_none());
    }

    #[test]
    fn test_missing_api_key() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let result = Config::from_lookup(lookup_from(&[("GOOGLE_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "key-123"),
            ("PORT", "8501"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("GEMINI_MAX_OUTPUT_TOKENS", "512"),
            ("GEMINI_TEMPERATURE", "0.2"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.cors_allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.llm.model, "gemini-1.5-flash");
        assert_eq!(config.llm.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.llm.max_output_tokens, Some(512));
        assert_eq!(config.llm.temperature, Some(0.2));
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "key-123"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::from_lookup(lookup_from(&[("GOOGLE_API_KEY", "super-secret")])).unwrap();
        let rendered = format!("{:?}", config.llm);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
