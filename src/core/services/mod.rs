pub mod completion;
pub mod speech;
pub mod transcription;
