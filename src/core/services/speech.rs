use crate::core::audio::{AudioBlob, AudioFormat};
use crate::core::config::Config;
use crate::errors::MyError;
use crate::util::split_text;
use async_trait::async_trait;
use bytes::BytesMut;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{REFERER, USER_AGENT};

/// The translate_tts endpoint rejects longer `q` values.
pub const MAX_CHUNK_CHARS: usize = 100;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioBlob, MyError>;
}

/// Google Translate's public speech endpoint. Produces MP3.
pub struct GoogleTts {
    http: Client,
    base_url: String,
    language: String,
}

impl GoogleTts {
    pub fn new(http: Client, base_url: &str, language: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(http, config.get_tts_base_url(), config.get_tts_language())
    }
}

/// Packs words greedily into chunks of at most `max_chars` characters.
/// Words longer than the limit are cut. Chunks without a single letter or
/// digit are dropped, there is nothing to pronounce in them.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for piece in split_text(word, max_chars) {
            let piece_len = piece.chars().count();
            if !current.is_empty() && current_len + 1 + piece_len > max_chars {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.retain(|chunk| chunk.chars().any(char::is_alphanumeric));
    chunks
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<AudioBlob, MyError> {
        let chunks = split_for_speech(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(MyError::NothingToSpeak);
        }

        let total = chunks.len().to_string();
        let mut audio = BytesMut::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            debug!("Synthesizing chunk {}/{} ({} chars)", idx, total, textlen);

            let response = self
                .http
                .get(format!("{}/translate_tts", self.base_url))
                .header(USER_AGENT, BROWSER_USER_AGENT)
                .header(REFERER, "https://translate.google.com/")
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", self.language.as_str()),
                    ("client", "tw-ob"),
                    ("ttsspeed", "1"),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!("Could not read speech synthesis error body: {}", e);
                        String::new()
                    }
                };
                return Err(MyError::Api {
                    service: "speech synthesis",
                    status: status.as_u16(),
                    body,
                });
            }

            audio.extend_from_slice(&response.bytes().await?);
        }

        Ok(AudioBlob::new(audio.freeze(), AudioFormat::Mp3))
    }
}
