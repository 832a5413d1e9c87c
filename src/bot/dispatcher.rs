use crate::{
    bot::{
        commander::CommandRouter,
        messages::{incoming::IncomingMessage, voice::VoiceAssistantPipeline},
        transport::{TelegramTransport, Transport},
    },
    core::{
        config::Config,
        services::{
            completion::OpenAiChat, speech::GoogleTts, transcription::WhisperClient,
        },
    },
    errors::MyError,
    util::enums::Command,
};
use log::info;
use std::sync::Arc;
use teloxide::{
    Bot,
    dispatching::{Dispatcher, UpdateFilterExt, UpdateHandler},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::{Message, Requester},
    types::{Me, Update},
    update_listeners::Polling,
    utils::command::BotCommands,
};

async fn message_handler(
    message: Message,
    me: Me,
    router: Arc<CommandRouter>,
) -> Result<(), MyError> {
    let incoming = IncomingMessage::from_telegram(&message, me.username());
    router.dispatch(&incoming).await
}

pub fn schema() -> UpdateHandler<MyError> {
    Update::filter_message().endpoint(message_handler)
}

fn build_router(bot: &Bot, config: &Config) -> Result<CommandRouter, MyError> {
    let http = reqwest::Client::builder()
        .timeout(config.get_http_timeout())
        .build()?;

    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));
    let pipeline = VoiceAssistantPipeline::new(
        transport.clone(),
        Arc::new(WhisperClient::from_config(http.clone(), config)),
        Arc::new(OpenAiChat::from_config(http.clone(), config)),
        Arc::new(GoogleTts::from_config(http, config)),
        config.get_assistant_prompt(),
    );

    Ok(CommandRouter::new(transport, pipeline))
}

pub async fn run(config: Arc<Config>) -> Result<(), MyError> {
    let bot = Bot::new(config.get_bot_token());

    bot.set_my_commands(Command::bot_commands()).await?;

    let me = bot.get_me().await?;
    info!("Bot name: {:?}", me.username());

    let router = Arc::new(build_router(&bot, &config)?);
    info!(
        "Using {} for transcription, {} for replies, speech language {}",
        config.get_transcription_model(),
        config.get_chat_model(),
        config.get_tts_language()
    );

    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![router, me])
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(listener, LoggingErrorHandler::new())
        .await;

    Ok(())
}
