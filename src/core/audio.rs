use crate::errors::MyError;
use bytes::Bytes;
use log::debug;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// Telegram voice notes: Opus in an Ogg container.
    OggOpus,
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::OggOpus => ".ogg",
            AudioFormat::Mp3 => ".mp3",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AudioBlob {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioBlob {
    pub fn new(data: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }
}

/// Audio written to a private temporary file. The file is deleted when this
/// value is dropped, whichever way the owning scope is left.
pub struct TempAudio {
    file: NamedTempFile,
}

impl TempAudio {
    pub async fn persist(blob: &AudioBlob) -> Result<Self, MyError> {
        let file = tempfile::Builder::new()
            .prefix("voice-")
            .suffix(blob.format.extension())
            .tempfile()?;
        tokio::fs::write(file.path(), &blob.data).await?;
        debug!("Stored {} bytes of audio in {:?}", blob.data.len(), file.path());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
