//! Game loop thread: ticks the session at the configured rate, forwards its
//! events to the capability backends and publishes each snapshot.
//!
//! The session is created inside this thread. Commands arrive via `mpsc`.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use wordplay_core::commands::SessionCommand;
use wordplay_core::state::SessionSnapshot;
use wordplay_sim::platform::dispatch_events;
use wordplay_sim::Session;

use crate::backends::{LogAudio, LogUi};
use crate::config::AppConfig;
use crate::state::LoopCommand;

/// Nominal duration of one frame.
pub fn tick_duration(frame_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / frame_rate.max(1) as u64)
}

/// Commands that load the configured word, and start it when asked to.
pub fn initial_commands(config: &AppConfig) -> Vec<SessionCommand> {
    let mut commands = Vec::new();
    if let Some(word) = &config.initial_word {
        commands.push(SessionCommand::SetTargetWord {
            word: word.clone(),
            meaning: config.initial_meaning.clone().unwrap_or_default(),
        });
        if config.autostart {
            commands.push(SessionCommand::Start);
        }
    }
    commands
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: AppConfig,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
) -> (mpsc::Sender<LoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("wordplay-game-loop".into())
        .spawn(move || {
            run_game_loop(&config, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: &AppConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
) {
    let mut session = Session::new(config.session.clone());
    session.queue_commands(initial_commands(config));
    let mut audio = LogAudio::default();
    let mut ui = LogUi::default();

    let frame = tick_duration(config.effective_frame_rate());
    log::info!("game loop running at {} fps", config.effective_frame_rate());

    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Session(cmd)) => session.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => {
                    log::info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the wall-clock time since the last frame
        let now = Instant::now();
        let dt_ms = (now - last_tick).as_secs_f32() * 1000.0;
        last_tick = now;
        let snapshot = session.tick(dt_ms);

        // 3. Feed the capabilities
        dispatch_events(&snapshot.events, &mut audio, &mut ui);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        next_tick_time += frame;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > frame * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
