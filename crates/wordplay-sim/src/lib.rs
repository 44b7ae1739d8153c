//! Simulation for the WORDPLAY vocabulary games.
//!
//! Owns the three mode engines and the session controller that drives them,
//! plus the render dispatcher and the capability traits the platform
//! implements. Headless and deterministic under a seed.

pub mod dictation;
pub mod engine;
pub mod hunter;
pub mod misspell;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod shooter;
pub mod text;

pub use session::{Session, SessionConfig};
pub use wordplay_core as core;

#[cfg(test)]
mod tests;
