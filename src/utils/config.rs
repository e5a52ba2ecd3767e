use crate::types::{AppError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    /// Messages of conversation history exposed to the model per turn.
    pub history_window: usize,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub ollama_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub max_results: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                ollama_url: env::var("ARIA_OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("ARIA_MODEL").unwrap_or_else(|_| "llama3.2:1b".to_string()),
            },
            search: SearchConfig {
                base_url: env::var("ARIA_SEARCH_URL")
                    .unwrap_or_else(|_| "https://api.crossref.org".to_string()),
                max_results: parse_var("ARIA_SEARCH_MAX_RESULTS", 3)?,
            },
            history_window: parse_var("ARIA_HISTORY_WINDOW", 10)?,
        })
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got '{}'", name, value))),
        Err(_) => Ok(default),
    }
}
