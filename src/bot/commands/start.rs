use crate::bot::messages::incoming::IncomingMessage;
use crate::bot::transport::Transport;
use crate::errors::MyError;
use crate::util::enums::Command;
use crate::util::texts::GREETING;
use log::debug;

pub async fn start_handler(transport: &dyn Transport, message: &IncomingMessage) -> Result<(), MyError> {
    if let Some(Command::Start(payload)) = &message.command
        && !payload.is_empty()
    {
        debug!("Start payload from chat {}: {}", message.chat_id, payload);
    }

    transport.send_text(message.chat_id, GREETING).await
}
