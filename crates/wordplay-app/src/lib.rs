//! WORDPLAY headless driver.
//!
//! Runs a session on its own loop thread, feeds it commands over a channel
//! and forwards the resulting events to logging capability backends.

pub mod backends;
pub mod config;
pub mod game_loop;
pub mod state;

pub use wordplay_core as core;
