use crate::errors::MyError;
use std::fmt;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_ASSISTANT_PROMPT: &str = "Ты дружелюбный помощник.";
const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";
const DEFAULT_TTS_LANGUAGE: &str = "ru";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Process-wide settings. Built once at startup and shared read-only.
pub struct Config {
    bot_token: String,
    openai_api_key: String,
    openai_base_url: String,
    transcription_model: String,
    chat_model: String,
    assistant_prompt: String,
    tts_base_url: String,
    tts_language: String,
    http_timeout: Duration,
}

impl Config {
    /// Reads the process environment; `.env` must already be loaded.
    pub fn from_env() -> Result<Self, MyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| value(key).ok_or(MyError::MissingEnv(key));
        let optional = |key: &str, default: &str| value(key).unwrap_or_else(|| default.to_string());

        let bot_token = required("BOT_TOKEN")?;
        let openai_api_key = required("OPENAI_API_KEY")?;

        let http_timeout = match value("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(MyError::InvalidEnv {
                    key: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Config {
            bot_token,
            openai_api_key,
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            transcription_model: optional(
                "OPENAI_TRANSCRIPTION_MODEL",
                DEFAULT_TRANSCRIPTION_MODEL,
            ),
            chat_model: optional("OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            assistant_prompt: optional("ASSISTANT_PROMPT", DEFAULT_ASSISTANT_PROMPT),
            tts_base_url: optional("TTS_BASE_URL", DEFAULT_TTS_BASE_URL),
            tts_language: optional("TTS_LANGUAGE", DEFAULT_TTS_LANGUAGE),
            http_timeout,
        })
    }

    pub fn get_bot_token(&self) -> &str {
        &self.bot_token
    }

    pub fn get_openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn get_openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    pub fn get_transcription_model(&self) -> &str {
        &self.transcription_model
    }

    pub fn get_chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn get_assistant_prompt(&self) -> &str {
        &self.assistant_prompt
    }

    pub fn get_tts_base_url(&self) -> &str {
        &self.tts_base_url
    }

    pub fn get_tts_language(&self) -> &str {
        &self.tts_language
    }

    pub fn get_http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("transcription_model", &self.transcription_model)
            .field("chat_model", &self.chat_model)
            .field("tts_base_url", &self.tts_base_url)
            .field("tts_language", &self.tts_language)
            .field("http_timeout", &self.http_timeout)
            .finish_non_exhaustive()
    }
}
