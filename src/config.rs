// src/config.rs
//! Process configuration, loaded once at startup from the environment
//! (after `.env` has been read by `dotenvy`).

use std::time::Duration;

const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://43.202.0.119:8080",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://10.34.11.38:3000",
];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,

    /// Anthropic API key. Without it every LLM-backed request fails fast.
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Timeout for a single upstream call.
    pub llm_timeout: Duration,

    pub chat_max_tokens: u32,
    pub slides_max_tokens: u32,
    /// Seed message for every new chat transcript.
    pub chat_system_prompt: String,

    /// Sessions idle longer than this are purged.
    pub session_ttl: Duration,
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            anthropic_api_key: None,
            anthropic_base_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.2,
            llm_timeout: Duration::from_secs(240),
            chat_max_tokens: 1024,
            slides_max_tokens: 15_000,
            chat_system_prompt: "Write a report.".to_string(),
            session_ttl: Duration::from_secs(24 * 60 * 60),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            anthropic_base_url: env_or("ANTHROPIC_BASE_URL", defaults.anthropic_base_url),
            model: env_or("ANTHROPIC_MODEL", defaults.model),
            temperature: env_parse("LLM_TEMPERATURE", defaults.temperature),
            llm_timeout: Duration::from_secs(env_parse(
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout.as_secs(),
            )),
            chat_max_tokens: env_parse("CHAT_MAX_TOKENS", defaults.chat_max_tokens),
            slides_max_tokens: env_parse("SLIDES_MAX_TOKENS", defaults.slides_max_tokens),
            chat_system_prompt: env_or("CHAT_SYSTEM_PROMPT", defaults.chat_system_prompt),
            session_ttl: Duration::from_secs(env_parse(
                "SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )),
            cors_origins: std::env::var("CORS_ORIGINS")
                .ok()
                .map(|s| parse_origins(&s))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://a:1 , ,http://b:2,");
        assert_eq!(origins, vec!["http://a:1", "http://b:2"]);
    }

    #[test]
    fn defaults_match_deployment() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.slides_max_tokens, 15_000);
        assert_eq!(cfg.cors_origins.len(), 4);
        assert!(cfg.anthropic_api_key.is_none());
    }
}
