use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::GenerationOptions;

/// Application configuration loaded from environment variables.
/// Everything has a local-development default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_host: String,
    pub ollama_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub latex_compiler_url: String,
    /// Profiles are kept in memory when unset.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            ollama_host: env_or("OLLAMA_HOST", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "mistral:latest"),
            llm_temperature: parse_env("LLM_TEMPERATURE", 0.7)?,
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", 4096)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            latex_compiler_url: env_or("LATEX_COMPILER_URL", "https://latexonline.cc/compile"),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.llm_temperature,
            max_tokens: self.llm_max_tokens,
            json: false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{value}'")),
        None => Ok(default),
    }
}
