use crate::{
    bot::{
        commands::start::start_handler,
        messages::{incoming::IncomingMessage, voice::VoiceAssistantPipeline},
        transport::Transport,
    },
    errors::MyError,
    util::{enums::Command, texts::VOICE_REQUIRED},
};
use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    Voice,
    Other,
}

impl Route {
    /// A command takes precedence over an attachment.
    pub fn of(message: &IncomingMessage) -> Self {
        match (&message.command, &message.voice) {
            (Some(Command::Start(_)), _) => Route::Start,
            (None, Some(_)) => Route::Voice,
            (None, None) => Route::Other,
        }
    }
}

pub struct CommandRouter {
    transport: Arc<dyn Transport>,
    pipeline: VoiceAssistantPipeline,
}

impl CommandRouter {
    pub fn new(transport: Arc<dyn Transport>, pipeline: VoiceAssistantPipeline) -> Self {
        Self {
            transport,
            pipeline,
        }
    }

    pub async fn dispatch(&self, message: &IncomingMessage) -> Result<(), MyError> {
        let route = Route::of(message);
        debug!("Routing message in chat {} to {:?}", message.chat_id, route);

        match route {
            Route::Start => start_handler(self.transport.as_ref(), message).await,
            Route::Voice => self.pipeline.handle(message).await,
            Route::Other => {
                self.transport
                    .send_text(message.chat_id, VOICE_REQUIRED)
                    .await
            }
        }
    }
}
