//! Capability backends for the headless driver. Everything goes to the log.

use wordplay_core::enums::{GameType, Sound, Track};
use wordplay_core::error::AudioError;
use wordplay_core::events::Utterance;
use wordplay_sim::platform::{AudioBackend, UiHost};

/// Logs audio requests instead of playing them.
#[derive(Debug, Default)]
pub struct LogAudio {
    current_track: Option<Track>,
}

impl LogAudio {
    pub fn current_track(&self) -> Option<Track> {
        self.current_track
    }
}

impl AudioBackend for LogAudio {
    fn play_sound(&mut self, sound: Sound) -> Result<(), AudioError> {
        log::info!("sound: {}", sound.asset());
        Ok(())
    }

    fn play_background_track(&mut self, track: Track) -> Result<(), AudioError> {
        if self.current_track == Some(track) {
            return Ok(());
        }
        log::info!("music: {}", track.asset());
        self.current_track = Some(track);
        Ok(())
    }

    fn stop_background_track(&mut self) -> Result<(), AudioError> {
        if let Some(track) = self.current_track.take() {
            log::info!("music stopped: {}", track.asset());
        }
        Ok(())
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), AudioError> {
        log::info!(
            "say {:?} as {} (rate {}, pitch {}, {})",
            utterance.text,
            utterance.profile.label(),
            utterance.params.rate,
            utterance.params.pitch,
            utterance.lang
        );
        Ok(())
    }
}

/// Logs chrome updates and remembers the last congratulation.
#[derive(Debug, Default)]
pub struct LogUi {
    pub last_congratulation: Option<(GameType, u32)>,
}

impl UiHost for LogUi {
    fn show_spelling_correction(&mut self, input: &str, suggestions: &[String]) {
        log::info!("{:?} is not right, try {:?}", input, suggestions);
    }

    fn show_congratulations(&mut self, game: GameType, play_count: u32) {
        log::info!(
            "congratulations! {} won, play count {}",
            game.display_name(),
            play_count
        );
        self.last_congratulation = Some((game, play_count));
    }

    fn round_complete(&mut self, game: GameType) {
        log::debug!("{}: round complete", game.display_name());
    }

    fn focus_text_input(&mut self) {
        log::debug!("text input focused");
    }
}
