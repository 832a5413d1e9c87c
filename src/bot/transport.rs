use crate::bot::messages::incoming::VoiceRef;
use crate::core::audio::{AudioBlob, AudioFormat};
use crate::errors::MyError;
use async_trait::async_trait;
use log::debug;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::InputFile;

/// The three Bot API operations the handlers need.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn resolve_attachment(&self, voice: &VoiceRef) -> Result<AudioBlob, MyError>;

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), MyError>;

    async fn send_voice(
        &self,
        chat_id: ChatId,
        audio: AudioBlob,
        file_name: &str,
    ) -> Result<(), MyError>;
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn resolve_attachment(&self, voice: &VoiceRef) -> Result<AudioBlob, MyError> {
        let file = self.bot.get_file(voice.file_id.clone()).await?;
        let mut buffer = Vec::with_capacity(voice.size as usize);
        self.bot.download_file(&file.path, &mut buffer).await?;

        debug!(
            "Downloaded voice {} ({} bytes, {} s, {})",
            voice.file_id,
            buffer.len(),
            voice.duration_secs,
            voice.mime_type.as_deref().unwrap_or("unknown type")
        );
        Ok(AudioBlob::new(buffer, AudioFormat::OggOpus))
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), MyError> {
        self.bot.send_message(chat_id, text.to_string()).await?;
        Ok(())
    }

    async fn send_voice(
        &self,
        chat_id: ChatId,
        audio: AudioBlob,
        file_name: &str,
    ) -> Result<(), MyError> {
        let voice = InputFile::memory(audio.data.to_vec()).file_name(file_name.to_string());
        self.bot.send_voice(chat_id, voice).await?;
        Ok(())
    }
}
