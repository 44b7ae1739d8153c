//! Capabilities the platform provides, and routing of session events to them.

use wordplay_core::enums::{GameType, Sound, Track};
use wordplay_core::error::AudioError;
use wordplay_core::events::{GameEvent, Utterance};

/// Sound effects, music and speech.
pub trait AudioBackend {
    fn play_sound(&mut self, sound: Sound) -> Result<(), AudioError>;
    fn play_background_track(&mut self, track: Track) -> Result<(), AudioError>;
    fn stop_background_track(&mut self) -> Result<(), AudioError>;
    fn speak(&mut self, utterance: &Utterance) -> Result<(), AudioError>;
}

/// UI chrome around the canvas.
pub trait UiHost {
    fn show_spelling_correction(&mut self, input: &str, suggestions: &[String]);
    fn show_congratulations(&mut self, game: GameType, play_count: u32);
    fn round_complete(&mut self, game: GameType);
    /// The virtual text input took focus. Optional.
    fn focus_text_input(&mut self) {}
}

/// Forward events to the capabilities. Audio failures are logged and
/// skipped; they never stop later events.
pub fn dispatch_events(
    events: &[GameEvent],
    audio: &mut dyn AudioBackend,
    ui: &mut dyn UiHost,
) {
    for event in events {
        let result = match event {
            GameEvent::PlaySound { sound } => audio.play_sound(*sound),
            GameEvent::PlayBackgroundTrack { track } => audio.play_background_track(*track),
            GameEvent::StopBackgroundTrack => audio.stop_background_track(),
            GameEvent::Speak { utterance } => audio.speak(utterance),
            GameEvent::ShowSpellingCorrection { input, suggestions } => {
                ui.show_spelling_correction(input, suggestions);
                Ok(())
            }
            GameEvent::FocusTextInput => {
                ui.focus_text_input();
                Ok(())
            }
            GameEvent::RoundComplete { game } => {
                ui.round_complete(*game);
                Ok(())
            }
            GameEvent::GameComplete { game, play_count } => {
                ui.show_congratulations(*game, *play_count);
                Ok(())
            }
        };
        if let Err(err) = result {
            log::warn!("audio request {:?} failed: {}", event, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordplay_core::enums::VoiceProfile;

    #[derive(Default)]
    struct FlakyAudio {
        played: Vec<Sound>,
        spoken: Vec<String>,
    }

    impl AudioBackend for FlakyAudio {
        fn play_sound(&mut self, sound: Sound) -> Result<(), AudioError> {
            if sound == Sound::Laser {
                return Err(AudioError::MissingAsset(sound.asset().into()));
            }
            self.played.push(sound);
            Ok(())
        }

        fn play_background_track(&mut self, _track: Track) -> Result<(), AudioError> {
            Err(AudioError::PlaybackRejected("autoplay blocked".into()))
        }

        fn stop_background_track(&mut self) -> Result<(), AudioError> {
            Ok(())
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<(), AudioError> {
            self.spoken.push(utterance.text.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Chrome {
        corrections: Vec<(String, Vec<String>)>,
        congrats: Vec<(GameType, u32)>,
        rounds: u32,
    }

    impl UiHost for Chrome {
        fn show_spelling_correction(&mut self, input: &str, suggestions: &[String]) {
            self.corrections.push((input.into(), suggestions.to_vec()));
        }

        fn show_congratulations(&mut self, game: GameType, play_count: u32) {
            self.congrats.push((game, play_count));
        }

        fn round_complete(&mut self, _game: GameType) {
            self.rounds += 1;
        }
    }

    #[test]
    fn test_failures_do_not_stop_dispatch() {
        let events = vec![
            GameEvent::PlaySound { sound: Sound::Laser },
            GameEvent::PlayBackgroundTrack { track: Track::Shooter },
            GameEvent::PlaySound { sound: Sound::Explosion },
            GameEvent::Speak {
                utterance: Utterance {
                    text: "apple".into(),
                    profile: VoiceProfile::Child,
                    params: VoiceProfile::Child.params(),
                    lang: "en-US".into(),
                },
            },
            GameEvent::ShowSpellingCorrection {
                input: "aple".into(),
                suggestions: vec!["apple".into()],
            },
            GameEvent::RoundComplete { game: GameType::Dictation },
            GameEvent::GameComplete {
                game: GameType::Dictation,
                play_count: 2,
            },
        ];
        let mut audio = FlakyAudio::default();
        let mut ui = Chrome::default();
        dispatch_events(&events, &mut audio, &mut ui);

        assert_eq!(audio.played, vec![Sound::Explosion]);
        assert_eq!(audio.spoken, vec!["apple".to_string()]);
        assert_eq!(
            ui.corrections,
            vec![("aple".to_string(), vec!["apple".to_string()])]
        );
        assert_eq!(ui.rounds, 1);
        assert_eq!(ui.congrats, vec![(GameType::Dictation, 2)]);
    }
}
