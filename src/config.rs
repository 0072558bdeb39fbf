use anyhow::{Result, bail};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use tracing::Level;

use crate::console::Console;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_CONTENT_CHARS: usize = 5000;
pub const TEXT_RESULTS: usize = 3;
pub const QUIZ_QUESTIONS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub log_level: Level,
    pub fetch_timeout: Duration,
    pub max_content_chars: usize,
    pub text_results: usize,
}

impl Config {
    /// Reads the environment (after loading an optional `.env`).
    /// A missing api key is left empty; see [`Config::ensure_api_key`].
    pub fn from_env() -> Config {
        dotenv().ok(); // Load .env file if present
        Config {
            gemini_api_key: get_env_or_default("GEMINI_API_KEY", ""),
            gemini_model: get_env_or_default("GEMINI_MODEL", DEFAULT_MODEL),
            log_level: parse_level(&get_env_or_default("EXAM_PREP_LOG", "warn")),
            fetch_timeout: FETCH_TIMEOUT,
            max_content_chars: MAX_CONTENT_CHARS,
            text_results: TEXT_RESULTS,
        }
    }

    /// Prompts the operator for the api key once if the environment did not provide one.
    pub async fn ensure_api_key(&mut self, console: &dyn Console) -> Result<()> {
        if !self.gemini_api_key.trim().is_empty() {
            return Ok(());
        }
        console.write_line("GEMINI_API_KEY not found in environment variables.");
        let key = console
            .read_line("Please enter your Gemini API Key: ")
            .await?
            .unwrap_or_default();
        let key = key.trim();
        if key.is_empty() {
            bail!("no Gemini API key provided");
        }
        self.gemini_api_key = key.to_string();
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            log_level: Level::WARN,
            fetch_timeout: FETCH_TIMEOUT,
            max_content_chars: MAX_CONTENT_CHARS,
            text_results: TEXT_RESULTS,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_level(raw: &str) -> Level {
    raw.trim().parse().unwrap_or(Level::WARN)
}
