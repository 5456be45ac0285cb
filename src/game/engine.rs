use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    apple::Apple,
    config::{GameConfig, SpawnPolicy},
    snake::Snake,
    state::{CollisionType, GameState},
};
use crate::error::{GameError, Result};
use crate::results::{GameResult, ResultsSink};

/// What happened during one call to [`GameEngine::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Number of snake steps taken
    pub steps: u32,
    /// Apples eaten during those steps
    pub apples_eaten: u32,
    /// Set when the game ended during this call
    pub collision: Option<CollisionType>,
}

/// Fixed-step simulation of one game session and its restarts
///
/// Time fed to [`update`](Self::update) is accumulated and converted into whole
/// snake steps, so the snake moves at the configured speed whatever the frame
/// rate of the caller.
pub struct GameEngine {
    config: GameConfig,
    field_width: i32,
    field_height: i32,
    step_interval: Duration,
    rng: StdRng,
    snake: Snake,
    apple: Apple,
    state: GameState,
    score: u32,
    high_score: u32,
    accumulator: Duration,
    last_result: Option<GameResult>,
    sink: Box<dyn ResultsSink + Send>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    ///
    /// Fails when the configuration is invalid; the engine never starts on a
    /// field it cannot play.
    pub fn new(config: GameConfig, sink: impl ResultsSink + Send + 'static) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let field_width = config.aligned_width();
        let field_height = config.aligned_height();
        let snake = initial_snake(&config);
        let apple = spawn_apple(&mut rng, &config, field_width, field_height, &snake);

        Ok(Self {
            step_interval: config.step_interval(),
            field_width,
            field_height,
            config,
            rng,
            snake,
            apple,
            state: GameState::Playing,
            score: 0,
            high_score: 0,
            accumulator: Duration::ZERO,
            last_result: None,
            sink: Box::new(sink),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Playable width after alignment to the grid
    pub fn field_width(&self) -> i32 {
        self.field_width
    }

    /// Playable height after alignment to the grid
    pub fn field_height(&self) -> i32 {
        self.field_height
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Result of the most recent game over, kept across restarts
    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    /// Dispatch one input command. Returns whether it had any effect.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Turn(direction) => self.request_direction(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
            Command::PauseOrRestart => {
                if self.state.is_over() {
                    self.restart()
                } else {
                    self.toggle_pause()
                }
            }
        }
    }

    /// Forward a turn to the snake; dropped unless playing
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        self.snake.request_direction(direction)
    }

    /// Playing <-> Paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::GameOver => return false,
        };
        debug!(state = ?self.state, "pause toggled");
        true
    }

    /// Start a fresh session after game over; the high score survives
    pub fn restart(&mut self) -> bool {
        if !self.state.is_over() {
            return false;
        }

        self.snake = initial_snake(&self.config);
        self.apple = spawn_apple(
            &mut self.rng,
            &self.config,
            self.field_width,
            self.field_height,
            &self.snake,
        );
        self.score = 0;
        self.accumulator = Duration::ZERO;
        self.state = GameState::Playing;

        info!(high_score = self.high_score, "game restarted");
        true
    }

    /// Advance the simulation by `dt` of real time
    ///
    /// Takes as many steps as are due and stops early on game over. A sink
    /// error is returned only after the engine has moved to game over.
    pub fn update(&mut self, dt: Duration) -> Result<TickReport> {
        let mut report = TickReport::default();
        if !self.state.is_playing() {
            return Ok(report);
        }

        self.accumulator += dt;

        while self.accumulator >= self.step_interval {
            self.accumulator -= self.step_interval;
            self.snake.step();
            report.steps += 1;

            if self.snake.head().overlaps(self.apple.body()) {
                self.eat_apple();
                report.apples_eaten += 1;
            }

            if let Some(collision) = self.detect_collision() {
                report.collision = Some(collision);
                self.finish(collision)?;
                break;
            }
        }

        Ok(report)
    }

    fn eat_apple(&mut self) {
        self.snake.request_growth(1);
        self.score = self.score.saturating_add(self.apple.value());

        let grid = self.config.grid_size;
        match self.config.spawn_policy {
            SpawnPolicy::Anywhere => {
                self.apple
                    .relocate(&mut self.rng, self.field_width, self.field_height, grid)
            }
            SpawnPolicy::AvoidSnake => {
                self.apple.relocate_avoiding(
                    &mut self.rng,
                    self.field_width,
                    self.field_height,
                    grid,
                    &self.snake,
                );
            }
        }

        debug!(score = self.score, apple = ?self.apple.position(), "apple eaten");
    }

    fn detect_collision(&self) -> Option<CollisionType> {
        if self.snake.collides_with_wall(self.field_width, self.field_height) {
            Some(CollisionType::Wall)
        } else if self.snake.collides_with_self() {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }

    fn finish(&mut self, collision: CollisionType) -> Result<()> {
        self.state = GameState::GameOver;
        self.high_score = self.high_score.max(self.score);

        let result = GameResult {
            player: self.config.player_name.clone(),
            score: self.score,
            length: self.snake.len(),
            timestamp: Local::now(),
            speed: self.config.moves_per_second,
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            grid_size: self.config.grid_size,
        };
        info!(
            ?collision,
            score = result.score,
            length = result.length,
            high_score = self.high_score,
            "game over"
        );

        let recorded = self.sink.record(&result).map_err(GameError::Results);
        self.last_result = Some(result);
        recorded
    }
}

/// Snake at the aligned center of the field, heading right
fn initial_snake(config: &GameConfig) -> Snake {
    let grid = config.grid_size;
    let x = config.aligned_width() / 2 / grid * grid;
    let y = config.aligned_height() / 2 / grid * grid;
    Snake::new(
        x,
        y,
        grid,
        config.initial_snake_length,
        config.head_color,
        config.body_colors.clone(),
    )
}

/// First apple of a session, placed under the configured spawn policy
fn spawn_apple(
    rng: &mut StdRng,
    config: &GameConfig,
    field_width: i32,
    field_height: i32,
    snake: &Snake,
) -> Apple {
    let grid = config.grid_size;
    let mut apple = Apple::create_random(
        rng,
        field_width,
        field_height,
        grid,
        config.apple_color,
        config.apple_value,
    );
    if config.spawn_policy == SpawnPolicy::AvoidSnake {
        apple.relocate_avoiding(rng, field_width, field_height, grid, snake);
    }
    apple
}
