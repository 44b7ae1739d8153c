//! Core types and definitions for the WORDPLAY vocabulary games.
//!
//! This crate defines the vocabulary shared across all other crates:
//! game modes, geometry, commands, events, snapshots, errors and constants.
//! It has no dependency on any runtime, renderer or audio framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
