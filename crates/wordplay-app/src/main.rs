//! Headless WORDPLAY driver.
//!
//! Usage: `wordplay [config.json]`. Reads one JSON `SessionCommand` per line
//! from stdin; end of input shuts the loop down.

use std::io::BufRead;
use std::path::PathBuf;

use wordplay_app::config::AppConfig;
use wordplay_app::game_loop;
use wordplay_app::state::{AppState, LoopCommand};
use wordplay_core::commands::SessionCommand;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref());

    let mut state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone());
    state.command_tx = Some(tx.clone());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("stdin: {}", err);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<SessionCommand>(line) {
            Ok(command) => {
                if let Err(err) = state.send(command) {
                    log::warn!("{}", err);
                    break;
                }
            }
            Err(err) => log::warn!("ignoring {:?}: {}", line, err),
        }
    }

    if let Some(snapshot) = state.snapshot() {
        log::info!(
            "{} on {:?}, play count {}",
            snapshot.game.display_name(),
            snapshot.target_word,
            snapshot.play_count
        );
    }
    let _ = tx.send(LoopCommand::Shutdown);
    if handle.join().is_err() {
        log::warn!("game loop thread panicked");
    }
}
