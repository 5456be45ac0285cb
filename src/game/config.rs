use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::object::Rgb;
use crate::error::{GameError, Result};

/// Fastest accepted speed; beyond this the step interval stops being meaningful
pub const MAX_MOVES_PER_SECOND: u32 = 1000;

/// Where a consumed apple may reappear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Any cell of the field, including ones under the snake
    #[default]
    Anywhere,
    /// Only cells the snake does not cover
    AvoidSnake,
}

/// Configuration for the game
///
/// Field dimensions and the grid size are in pixels. The field is truncated
/// down to a whole number of cells before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Requested width of the field
    pub field_width: i32,
    /// Requested height of the field
    pub field_height: i32,
    /// Side of one cell
    pub grid_size: i32,
    /// Frame rate cap for the front end
    pub fps_cap: u32,
    /// Snake steps per second
    pub moves_per_second: u32,
    /// Name written to the results log
    pub player_name: String,
    /// Initial length of the snake, head included
    pub initial_snake_length: usize,
    /// Score awarded per apple
    pub apple_value: u32,
    pub head_color: Rgb,
    pub body_colors: Vec<Rgb>,
    pub apple_color: Rgb,
    pub spawn_policy: SpawnPolicy,
    /// Seed for apple placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            grid_size: 40,
            fps_cap: 60,
            moves_per_second: 10,
            player_name: "Player".to_string(),
            initial_snake_length: 3,
            apple_value: 1,
            head_color: Rgb::HEAD,
            body_colors: vec![Rgb::LIME, Rgb::FOREST],
            apple_color: Rgb::APPLE,
            spawn_policy: SpawnPolicy::Anywhere,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size and speed
    pub fn new(field_width: i32, field_height: i32, moves_per_second: u32) -> Self {
        Self {
            field_width,
            field_height,
            moves_per_second,
            ..Default::default()
        }
    }

    pub fn easy() -> Self {
        Self::new(600, 400, 8)
    }

    pub fn medium() -> Self {
        Self::new(800, 600, 12)
    }

    pub fn hard() -> Self {
        Self::new(1000, 800, 15)
    }

    /// Load a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let to_err = |source: Box<dyn std::error::Error + Send + Sync>| GameError::ConfigFile {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(|e| to_err(e.into()))?;
        serde_json::from_str(&text).map_err(|e| to_err(e.into()))
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }

        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(invalid(format!(
                "field dimensions must be positive, got {}x{}",
                self.field_width, self.field_height
            )));
        }

        if self.aligned_width() == 0 || self.aligned_height() == 0 {
            return Err(invalid(format!(
                "field {}x{} is smaller than one {}px cell",
                self.field_width, self.field_height, self.grid_size
            )));
        }

        if self.moves_per_second == 0 {
            return Err(invalid("moves_per_second must be at least 1".to_string()));
        }

        if self.moves_per_second > MAX_MOVES_PER_SECOND {
            return Err(invalid(format!(
                "moves_per_second must be at most {}, got {}",
                MAX_MOVES_PER_SECOND, self.moves_per_second
            )));
        }

        if self.fps_cap == 0 {
            return Err(invalid("fps_cap must be at least 1".to_string()));
        }

        if self.initial_snake_length == 0 {
            return Err(invalid("initial_snake_length must be at least 1".to_string()));
        }

        // The snake starts on the middle column with its body trailing left.
        let max_length = self.max_initial_length();
        if self.initial_snake_length > max_length {
            return Err(invalid(format!(
                "initial_snake_length {} does not fit a {}-column field (at most {})",
                self.initial_snake_length,
                self.columns(),
                max_length
            )));
        }

        if self.apple_value == 0 {
            return Err(invalid("apple_value must be at least 1".to_string()));
        }

        if self.body_colors.is_empty() {
            return Err(invalid("body_colors must name at least one color".to_string()));
        }

        Ok(())
    }

    /// Field width rounded down to a whole number of cells
    pub fn aligned_width(&self) -> i32 {
        align_down(self.field_width, self.grid_size)
    }

    /// Field height rounded down to a whole number of cells
    pub fn aligned_height(&self) -> i32 {
        align_down(self.field_height, self.grid_size)
    }

    pub fn columns(&self) -> i32 {
        self.aligned_width() / self.grid_size.max(1)
    }

    pub fn rows(&self) -> i32 {
        self.aligned_height() / self.grid_size.max(1)
    }

    /// Longest snake whose tail still starts inside the field
    pub fn max_initial_length(&self) -> usize {
        usize::try_from(self.columns() / 2).unwrap_or(0) + 1
    }

    /// Time between two snake steps
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs(1) / self.moves_per_second.max(1)
    }

    /// Time between two rendered frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps_cap.max(1)
    }
}

fn align_down(value: i32, grid_size: i32) -> i32 {
    if grid_size <= 0 || value <= 0 {
        return 0;
    }
    value / grid_size * grid_size
}

fn invalid(message: String) -> GameError {
    GameError::InvalidConfig(message)
}
