//! Error types surfaced by the session and by capability backends.

use std::fmt;

/// Validation failures returned to the caller. The game does not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The word was empty after trimming.
    EmptyWord,
    /// The meaning was empty after trimming.
    EmptyMeaning,
    /// `start` was called before any word was set.
    NoTargetWord,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyWord => write!(f, "target word must not be empty"),
            SessionError::EmptyMeaning => write!(f, "target meaning must not be empty"),
            SessionError::NoTargetWord => write!(f, "no target word has been set"),
        }
    }
}

impl std::error::Error for SessionError {}

/// A sound or voice could not be played. Logged and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The named asset was never loaded.
    MissingAsset(String),
    /// The platform refused playback (autoplay policy, device busy).
    PlaybackRejected(String),
    /// No synthesizer voice is available for the requested profile.
    VoiceUnavailable(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::MissingAsset(name) => write!(f, "sound '{}' not available", name),
            AudioError::PlaybackRejected(msg) => write!(f, "playback rejected: {}", msg),
            AudioError::VoiceUnavailable(profile) => {
                write!(f, "no voice available for {}", profile)
            }
        }
    }
}

impl std::error::Error for AudioError {}
