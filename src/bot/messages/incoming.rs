use crate::util::enums::Command;
use teloxide::prelude::*;
use teloxide::types::UserId;
use teloxide::utils::command::BotCommands;

/// Handle to a voice note stored on Telegram's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRef {
    pub file_id: String,
    pub size: u32,
    pub duration_secs: u32,
    pub mime_type: Option<String>,
}

/// The parts of a Telegram message the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub sender: Option<UserId>,
    pub voice: Option<VoiceRef>,
    pub command: Option<Command>,
}

impl IncomingMessage {
    pub fn from_telegram(message: &Message, bot_username: &str) -> Self {
        let command = message
            .text()
            .and_then(|text| Command::parse(text, bot_username).ok());

        let voice = message.voice().map(|voice| VoiceRef {
            file_id: voice.file.id.clone(),
            size: voice.file.size,
            duration_secs: voice.duration.seconds(),
            mime_type: voice
                .mime_type
                .as_ref()
                .map(|mime| mime.essence_str().to_owned()),
        });

        Self {
            chat_id: message.chat.id,
            sender: message.from.as_ref().map(|user| user.id),
            voice,
            command,
        }
    }
}
