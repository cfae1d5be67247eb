use crate::core::hangman;
use crate::domain::ports::{Storage, WordSupply};
use crate::utils::error::{ArcadeError, Result};
use async_trait::async_trait;

/// The built-in word list.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWords;

#[async_trait]
impl WordSupply for DefaultWords {
    fn describe(&self) -> &'static str {
        "built-in words"
    }

    async fn words(&self, min_len: usize) -> Result<Vec<String>> {
        Ok(hangman::default_words(min_len))
    }
}

/// A newline-separated word list such as `/usr/share/dict/words`.
#[derive(Debug, Clone)]
pub struct DictionaryWords<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> DictionaryWords<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> WordSupply for DictionaryWords<S> {
    fn describe(&self) -> &'static str {
        "system dictionary"
    }

    async fn words(&self, min_len: usize) -> Result<Vec<String>> {
        let data = self.storage.read_file(&self.path).await.map_err(|e| {
            tracing::debug!("Dictionary read failed: {}", e);
            ArcadeError::WordSourceError {
                message: format!("I cannot reach the local system dictionary at `{}`!", self.path),
            }
        })?;
        Ok(hangman::filter_dictionary(&String::from_utf8_lossy(&data), min_len))
    }
}

/// Words spoken by the player, read from a transcript file.
#[derive(Debug, Clone)]
pub struct TranscriptWords<S: Storage> {
    storage: S,
    path: Option<String>,
}

impl<S: Storage> TranscriptWords<S> {
    pub fn new(storage: S, path: Option<String>) -> Self {
        Self { storage, path }
    }
}

#[async_trait]
impl<S: Storage> WordSupply for TranscriptWords<S> {
    fn describe(&self) -> &'static str {
        "speech transcript"
    }

    async fn words(&self, min_len: usize) -> Result<Vec<String>> {
        let path = self.path.as_deref().ok_or_else(|| ArcadeError::WordSourceError {
            message: "No speech transcript is configured (`hangman.transcript_path`).".to_string(),
        })?;
        let data = self.storage.read_file(path).await.map_err(|e| {
            tracing::debug!("Transcript read failed: {}", e);
            ArcadeError::WordSourceError {
                message: format!("I cannot hear anything from `{}`.", path),
            }
        })?;
        let words = hangman::filter_transcript(&String::from_utf8_lossy(&data), min_len);
        if words.is_empty() {
            return Err(ArcadeError::WordSourceError {
                message: format!(
                    "I could not recognize any words of at least {} letters in your speech.",
                    min_len
                ),
            });
        }
        Ok(words)
    }
}
