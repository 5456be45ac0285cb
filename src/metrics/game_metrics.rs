use std::time::Duration;

use crate::game::{GameEngine, GameState};

/// Per-process statistics shown by the front end
///
/// Play time advances only while the engine is playing, so pauses and the
/// game-over screen do not count.
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    pub play_time: Duration,
    pub games_played: u32,
    pub longest_snake: usize,
    last_state: GameState,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame into the statistics; call after `engine.update(dt)`
    pub fn observe(&mut self, engine: &GameEngine, dt: Duration) {
        let state = engine.state();

        if self.last_state.is_playing() {
            self.play_time += dt;
        }
        if state.is_over() && !self.last_state.is_over() {
            self.games_played += 1;
        }
        self.longest_snake = self.longest_snake.max(engine.snake().len());
        self.last_state = state;
    }

    /// Reset the per-game clock for a new session
    pub fn on_game_start(&mut self) {
        self.play_time = Duration::ZERO;
        self.last_state = GameState::Playing;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
