//! Enumeration types used throughout the games.

use serde::{Deserialize, Serialize};

use crate::types::VoiceParams;

/// The three mini-games, in switch order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    /// Shoot the balloons carrying the target's letters, in order.
    #[default]
    Shooter,
    /// Pick the correctly spelled card among misspelled distractors.
    Hunter,
    /// Listen to the word and type it.
    Dictation,
}

impl GameType {
    /// Next mode in the Shooter → Hunter → Dictation → Shooter cycle.
    pub fn next(self) -> Self {
        match self {
            GameType::Shooter => GameType::Hunter,
            GameType::Hunter => GameType::Dictation,
            GameType::Dictation => GameType::Shooter,
        }
    }

    /// Title drawn at the top of the canvas.
    pub fn display_name(self) -> &'static str {
        match self {
            GameType::Shooter => "Word Shooter",
            GameType::Hunter => "Word Hunter",
            GameType::Dictation => "Word Hearo",
        }
    }

    /// Looping music for the mode. Dictation stays silent so speech is audible.
    pub fn background_track(self) -> Option<Track> {
        match self {
            GameType::Shooter => Some(Track::Shooter),
            GameType::Hunter => Some(Track::Hunter),
            GameType::Dictation => None,
        }
    }
}

/// Word Hunter state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HunterPhase {
    /// Preview grid of blank cards, nothing clickable.
    #[default]
    Initial,
    Playing,
    Completed,
}

/// Speaker persona for a dictation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceProfile {
    Male,
    Female,
    Child,
    AsianFemale,
}

impl VoiceProfile {
    /// Profiles in round order.
    pub const ROUNDS: [VoiceProfile; 4] = [
        VoiceProfile::Male,
        VoiceProfile::Female,
        VoiceProfile::Child,
        VoiceProfile::AsianFemale,
    ];

    /// Profile for a 1-based round index. Out-of-range rounds clamp to the ends.
    pub fn for_round(round: u8) -> Self {
        let idx = (round.max(1) as usize - 1).min(Self::ROUNDS.len() - 1);
        Self::ROUNDS[idx]
    }

    /// Synthesizer parameters for this persona.
    pub fn params(self) -> VoiceParams {
        match self {
            VoiceProfile::Male => VoiceParams::new(0.9, 0.8, 1.0),
            VoiceProfile::Female => VoiceParams::new(1.0, 1.2, 1.0),
            VoiceProfile::Child => VoiceParams::new(1.1, 1.5, 0.9),
            VoiceProfile::AsianFemale => VoiceParams::new(0.95, 1.1, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VoiceProfile::Male => "Male",
            VoiceProfile::Female => "Female",
            VoiceProfile::Child => "Child",
            VoiceProfile::AsianFemale => "Asian Female",
        }
    }
}

/// Balloon artwork variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalloonSprite {
    Classic,
    Coral,
    Mint,
    Sky,
    Sun,
    Violet,
}

impl BalloonSprite {
    pub const ALL: [BalloonSprite; 6] = [
        BalloonSprite::Classic,
        BalloonSprite::Coral,
        BalloonSprite::Mint,
        BalloonSprite::Sky,
        BalloonSprite::Sun,
        BalloonSprite::Violet,
    ];

    /// Asset key handed to the canvas.
    pub fn asset(self) -> &'static str {
        match self {
            BalloonSprite::Classic => "balloon",
            BalloonSprite::Coral => "balloon1",
            BalloonSprite::Mint => "balloon2",
            BalloonSprite::Sky => "balloon3",
            BalloonSprite::Sun => "balloon4",
            BalloonSprite::Violet => "balloon5",
        }
    }
}

/// Card background gradient, cycled by card index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardTheme {
    Pink,
    Orange,
    Blue,
    Yellow,
    Green,
}

impl CardTheme {
    pub const CYCLE: [CardTheme; 5] = [
        CardTheme::Pink,
        CardTheme::Orange,
        CardTheme::Blue,
        CardTheme::Yellow,
        CardTheme::Green,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

/// Arrow-key directions for the spaceship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Keyboard input after translation at the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Backspace,
    Arrow(Direction),
}

/// Result of driving an engine for one step. Interpreted by the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    #[default]
    Continue,
    /// A level or round was cleared and the next one is live.
    RoundAdvanced,
    /// The whole game for the current word was won.
    GameComplete,
}

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Laser,
    Explosion,
    Correct,
    Wrong,
}

impl Sound {
    pub fn asset(self) -> &'static str {
        match self {
            Sound::Laser => "laser",
            Sound::Explosion => "explosion",
            Sound::Correct => "wordHunterCorrect",
            Sound::Wrong => "wordHunterWrong",
        }
    }
}

/// Looping background tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Shooter,
    Hunter,
}

impl Track {
    pub fn asset(self) -> &'static str {
        match self {
            Track::Shooter => "wordShooterMusic",
            Track::Hunter => "wordHunterMusic",
        }
    }
}
