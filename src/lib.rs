//! Grid Snake - a fixed-step Snake game engine
//!
//! This library provides:
//! - Core simulation: movement clock, turn buffering, growth and collisions (game module)
//! - Finished-game records and their sinks (results module)
//! - Terminal front end: input mapping, rendering, session metrics and the play loop

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod results;

pub use error::GameError;
