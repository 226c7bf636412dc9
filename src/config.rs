use std::env;
use secrecy::SecretString;

pub const DEFAULT_LLM_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub llm_api_key: Option<SecretString>,
    pub llm_api_base: String,
    pub llm_model: String,
    pub checklist_max_tokens: u32,
    pub question_max_tokens: u32,
    pub llm_structured_output: bool,
    pub youtube_api_key: Option<SecretString>,
    pub youtube_api_base: String,
    pub session_idle_minutes: i64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            llm_api_key: secret_from_env("GROQ_API_KEY"),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            checklist_max_tokens: env::var("LLM_CHECKLIST_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1000),
            question_max_tokens: env::var("LLM_QUESTION_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(500),
            llm_structured_output: env::var("LLM_STRUCTURED_OUTPUT")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            youtube_api_key: secret_from_env("YOUTUBE_API_KEY"),
            youtube_api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE.to_string()),
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(120),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
        }
    }

    /// Warn about credentials that are not set.
    /// Missing credentials only fail the individual external calls that need them.
    pub fn log_missing_credentials(&self) {
        if self.llm_api_key.is_none() {
            log::warn!(
                "GROQ_API_KEY is not set; checklist and quiz generation will fail until it is configured"
            );
        }

        if self.youtube_api_key.is_none() {
            log::warn!("YOUTUBE_API_KEY is not set; video recommendations will be unavailable");
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.web_server_host.clone(), self.web_server_port)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            llm_api_key: Some(SecretString::from("test_llm_key".to_string())),
            llm_api_base: "http://localhost:9999/v1".to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            checklist_max_tokens: 1000,
            question_max_tokens: 500,
            llm_structured_output: false,
            youtube_api_key: Some(SecretString::from("test_youtube_key".to_string())),
            youtube_api_base: "http://localhost:9998/youtube/v3".to_string(),
            session_idle_minutes: 120,
            cors_allowed_origin: None,
        }
    }
}

fn secret_from_env(name: &str) -> Option<SecretString> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
