/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameState::Playing)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameState::GameOver)
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_playing() {
        assert_eq!(GameState::default(), GameState::Playing);
        assert!(GameState::default().is_playing());
    }

    #[test]
    fn test_state_predicates() {
        assert!(!GameState::Paused.is_playing());
        assert!(!GameState::Paused.is_over());
        assert!(GameState::GameOver.is_over());
    }
}
