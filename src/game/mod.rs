//! Core game logic module for Snake
//!
//! This module contains all the simulation logic without any I/O or rendering
//! dependencies. The front end drives it through [`GameEngine::update`] and
//! [`GameEngine::handle`] and reads the resulting state back for drawing.

pub mod action;
pub mod apple;
pub mod config;
pub mod engine;
pub mod object;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use apple::Apple;
pub use config::{GameConfig, SpawnPolicy};
pub use engine::{GameEngine, TickReport};
pub use object::{GridObject, Rgb};
pub use snake::Snake;
pub use state::{CollisionType, GameState};
