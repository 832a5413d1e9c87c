pub const GREETING: &str = "Привет! Отправьте мне голосовое сообщение, и я его обработаю.";

pub const VOICE_REQUIRED: &str = "Пожалуйста, отправьте голосовое сообщение.";

pub const PROCESSING_FAILED: &str =
    "Произошла ошибка при обработке вашего сообщения. Попробуйте ещё раз.";

/// File name attached to the synthesized voice reply.
pub const REPLY_FILE_NAME: &str = "response.ogg";
