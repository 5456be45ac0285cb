use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the game library.
///
/// The simulation itself is total: collisions and rejected turns are state
/// transitions, not errors. What can fail is building an engine from a bad
/// configuration and writing a finished game to the results sink.
#[derive(Debug, Error)]
pub enum GameError {
    /// The configuration cannot describe a playable field.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A config file could not be read or parsed.
    #[error("failed to load config from {}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The results sink rejected a finished game. The engine has already
    /// moved to game over when this is returned.
    #[error("failed to record game result")]
    Results(#[source] io::Error),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
