use crate::bot::messages::incoming::{IncomingMessage, VoiceRef};
use crate::bot::transport::Transport;
use crate::core::audio::TempAudio;
use crate::core::services::completion::{ChatCompletion, ChatMessage};
use crate::core::services::speech::SpeechSynthesizer;
use crate::core::services::transcription::SpeechToText;
use crate::errors::MyError;
use crate::util::texts::{PROCESSING_FAILED, REPLY_FILE_NAME, VOICE_REQUIRED};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;
use teloxide::types::ChatId;

/// Voice in, voice out: download, transcribe, ask the model, speak the answer.
///
/// Holds no per-chat state; concurrent runs only share the read-only
/// collaborators.
pub struct VoiceAssistantPipeline {
    transport: Arc<dyn Transport>,
    transcriber: Arc<dyn SpeechToText>,
    completion: Arc<dyn ChatCompletion>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    assistant_prompt: String,
}

impl VoiceAssistantPipeline {
    pub fn new(
        transport: Arc<dyn Transport>,
        transcriber: Arc<dyn SpeechToText>,
        completion: Arc<dyn ChatCompletion>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        assistant_prompt: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            transcriber,
            completion,
            synthesizer,
            assistant_prompt: assistant_prompt.into(),
        }
    }

    /// Sends exactly one reply: the synthesized answer, or the generic error
    /// notice if any step failed. Only a failure to deliver that notice is
    /// returned to the caller.
    pub async fn handle(&self, message: &IncomingMessage) -> Result<(), MyError> {
        let Some(voice) = message.voice.as_ref() else {
            return self.transport.send_text(message.chat_id, VOICE_REQUIRED).await;
        };

        let started = Instant::now();
        match self.run(message.chat_id, voice).await {
            Ok(()) => {
                info!(
                    "Answered voice message in chat {} in {} ms",
                    message.chat_id,
                    started.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "Failed to process voice message in chat {} (sender {:?}): {:?}",
                    message.chat_id, message.sender, err
                );
                self.transport
                    .send_text(message.chat_id, PROCESSING_FAILED)
                    .await
            }
        }
    }

    async fn run(&self, chat_id: ChatId, voice: &VoiceRef) -> Result<(), MyError> {
        let audio = self.transport.resolve_attachment(voice).await?;

        let transcript = {
            let temp = TempAudio::persist(&audio).await?;
            self.transcriber.transcribe(temp.path()).await?
        };
        debug!("Transcript for chat {}: {:?}", chat_id, transcript);

        let messages = [
            ChatMessage::system(self.assistant_prompt.as_str()),
            ChatMessage::user(transcript),
        ];
        let reply = self.completion.complete(&messages).await?;
        debug!("Reply for chat {}: {:?}", chat_id, reply);

        let speech = self.synthesizer.synthesize(&reply).await?;
        debug!("Synthesized {} bytes for chat {}", speech.data.len(), chat_id);

        self.transport
            .send_voice(chat_id, speech, REPLY_FILE_NAME)
            .await
    }
}
