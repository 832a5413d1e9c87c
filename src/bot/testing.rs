//! In-memory collaborators that record every call in one shared log.

use crate::bot::commander::CommandRouter;
use crate::bot::messages::incoming::{IncomingMessage, VoiceRef};
use crate::bot::messages::voice::VoiceAssistantPipeline;
use crate::bot::transport::Transport;
use crate::core::audio::{AudioBlob, AudioFormat};
use crate::core::services::completion::{ChatCompletion, ChatMessage, Role};
use crate::core::services::speech::SpeechSynthesizer;
use crate::core::services::transcription::SpeechToText;
use crate::errors::MyError;
use crate::util::enums::Command;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use teloxide::types::{ChatId, UserId};

pub const PROMPT: &str = "Ты дружелюбный помощник.";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Resolve(String),
    Transcribe(PathBuf),
    Complete(Vec<ChatMessage>),
    Synthesize(String),
    SendText(ChatId, String),
    SendVoice(ChatId, Bytes, String),
}

#[derive(Default, Clone)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn transcribed_paths(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Transcribe(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn voice_replies(&self) -> Vec<(ChatId, Bytes)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendVoice(chat, data, _) => Some((chat, data)),
                _ => None,
            })
            .collect()
    }
}

pub fn voice_message(chat: i64, file_id: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id: ChatId(chat),
        sender: Some(UserId(chat as u64)),
        voice: Some(VoiceRef {
            file_id: file_id.to_string(),
            size: 4,
            duration_secs: 1,
            mime_type: Some("audio/ogg".to_string()),
        }),
        command: None,
    }
}

pub fn text_message(chat: i64) -> IncomingMessage {
    IncomingMessage {
        chat_id: ChatId(chat),
        sender: Some(UserId(chat as u64)),
        voice: None,
        command: None,
    }
}

pub fn start_message(chat: i64) -> IncomingMessage {
    IncomingMessage {
        command: Some(Command::Start(String::new())),
        ..text_message(chat)
    }
}

pub struct FakeTransport {
    log: CallLog,
    downloads: HashMap<String, Bytes>,
    fail_download: bool,
    fail_send_voice: bool,
}

#[async_trait]
impl Transport for FakeTransport {
    async fn resolve_attachment(&self, voice: &VoiceRef) -> Result<AudioBlob, MyError> {
        self.log.push(Call::Resolve(voice.file_id.clone()));
        if self.fail_download {
            return Err("file is too big".into());
        }
        let data = self
            .downloads
            .get(&voice.file_id)
            .cloned()
            .unwrap_or_else(|| Bytes::from_static(b"V1"));
        Ok(AudioBlob::new(data, AudioFormat::OggOpus))
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), MyError> {
        self.log.push(Call::SendText(chat_id, text.to_string()));
        Ok(())
    }

    async fn send_voice(
        &self,
        chat_id: ChatId,
        audio: AudioBlob,
        file_name: &str,
    ) -> Result<(), MyError> {
        self.log
            .push(Call::SendVoice(chat_id, audio.data, file_name.to_string()));
        if self.fail_send_voice {
            return Err("chat not found".into());
        }
        Ok(())
    }
}

pub enum Transcriber {
    Fixed(&'static str),
    /// Returns the downloaded bytes as text.
    ReadFile,
    Fail,
}

pub struct FakeTranscriber {
    log: CallLog,
    behaviour: Transcriber,
}

#[async_trait]
impl SpeechToText for FakeTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String, MyError> {
        self.log.push(Call::Transcribe(audio.to_path_buf()));
        assert!(audio.exists(), "temp audio must exist while transcribing");
        match self.behaviour {
            Transcriber::Fixed(text) => Ok(text.to_string()),
            Transcriber::ReadFile => {
                tokio::task::yield_now().await;
                let data = tokio::fs::read(audio).await?;
                Ok(String::from_utf8_lossy(&data).into_owned())
            }
            Transcriber::Fail => Err(MyError::Api {
                service: "transcription",
                status: 400,
                body: "Invalid file format.".to_string(),
            }),
        }
    }
}

pub enum Completion {
    Fixed(&'static str),
    /// Replies with the user turn.
    Echo,
    Fail,
}

pub struct FakeCompletion {
    log: CallLog,
    behaviour: Completion,
}

#[async_trait]
impl ChatCompletion for FakeCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, MyError> {
        self.log.push(Call::Complete(messages.to_vec()));
        match self.behaviour {
            Completion::Fixed(text) => Ok(text.to_string()),
            Completion::Echo => Ok(messages
                .iter()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.clone())
                .unwrap_or_default()),
            Completion::Fail => Err(MyError::EmptyCompletion),
        }
    }
}

pub enum Synthesizer {
    Fixed(&'static [u8]),
    /// Speaks the text back as its UTF-8 bytes.
    Echo,
    Fail,
}

pub struct FakeSynthesizer {
    log: CallLog,
    behaviour: Synthesizer,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioBlob, MyError> {
        self.log.push(Call::Synthesize(text.to_string()));
        match self.behaviour {
            Synthesizer::Fixed(data) => Ok(AudioBlob::new(Bytes::from_static(data), AudioFormat::Mp3)),
            Synthesizer::Echo => Ok(AudioBlob::new(text.as_bytes().to_vec(), AudioFormat::Mp3)),
            Synthesizer::Fail => Err(MyError::NothingToSpeak),
        }
    }
}

/// Builds a pipeline and router over fakes sharing one call log.
pub struct Harness {
    pub log: CallLog,
    pub downloads: HashMap<String, Bytes>,
    pub fail_download: bool,
    pub fail_send_voice: bool,
    pub transcriber: Transcriber,
    pub completion: Completion,
    pub synthesizer: Synthesizer,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            log: CallLog::default(),
            downloads: HashMap::new(),
            fail_download: false,
            fail_send_voice: false,
            transcriber: Transcriber::Fixed("hello"),
            completion: Completion::Fixed("hi there"),
            synthesizer: Synthesizer::Fixed(b"S1"),
        }
    }
}

impl Harness {
    fn parts(self) -> (CallLog, Arc<dyn Transport>, VoiceAssistantPipeline) {
        let log = self.log;
        let transport: Arc<dyn Transport> = Arc::new(FakeTransport {
            log: log.clone(),
            downloads: self.downloads,
            fail_download: self.fail_download,
            fail_send_voice: self.fail_send_voice,
        });
        let pipeline = VoiceAssistantPipeline::new(
            transport.clone(),
            Arc::new(FakeTranscriber {
                log: log.clone(),
                behaviour: self.transcriber,
            }),
            Arc::new(FakeCompletion {
                log: log.clone(),
                behaviour: self.completion,
            }),
            Arc::new(FakeSynthesizer {
                log: log.clone(),
                behaviour: self.synthesizer,
            }),
            PROMPT,
        );
        (log, transport, pipeline)
    }

    pub fn pipeline(self) -> (CallLog, VoiceAssistantPipeline) {
        let (log, _, pipeline) = self.parts();
        (log, pipeline)
    }

    pub fn router(self) -> (CallLog, CommandRouter) {
        let (log, transport, pipeline) = self.parts();
        (log, CommandRouter::new(transport, pipeline))
    }
}
