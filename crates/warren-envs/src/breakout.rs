//! The brick-breaking simulator.
//!
//! A ball bounces between the walls, a brick band near the ceiling, and
//! a paddle one row above the floor. Returning the ball off the paddle
//! banks it away from the paddle centre; reaching the floor ends the
//! episode. The per-tick collision order is a contract — each check
//! reads the mutations of the checks before it:
//!
//! 1. paddle move, 2. side walls, 3. ceiling, 4. paddle contact,
//! 5. bricks (straight hit shadows diagonal), 6. side walls again,
//! 7. movement gating against intact bricks, 8. floor termination.

use crate::{rng_from_seed, EnvRng};
use rand::Rng;
use warren_core::{Action, ActionPool, ConfigError};
use warren_env::{DiscreteActions, Environment, Observation, Step};
use warren_grid::{Frame, Grid, Point, Rgb};

/// Reward for returning the ball off the paddle.
const REWARD_RETURN: f32 = 1.0;
/// Reward subtracted when the ball reaches the floor.
const REWARD_MISS: f32 = -10.0;

/// Length of the observation vector.
const OBSERVATION_LEN: usize = 4;

/// The paddle accepts horizontal moves only.
const ACTIONS: ActionPool = ActionPool::new(&[Action::Left, Action::Right]);

/// Spawn velocities: always downward, either horizontal heading.
const SPAWN_VELOCITIES: [(i32, i32); 2] = [(-1, 1), (1, 1)];

const RED: Rgb = [255, 51, 51];
const ORANGE: Rgb = [255, 153, 51];
const YELLOW: Rgb = [255, 255, 51];
const GREEN: Rgb = [51, 255, 51];
const LIGHT_BLUE: Rgb = [51, 255, 255];
const BLUE: Rgb = [51, 153, 255];

/// Brick colours by layer, top-down; cycled when more layers are
/// configured than colours exist.
const LAYER_COLOURS: [Rgb; 6] = [RED, ORANGE, YELLOW, GREEN, LIGHT_BLUE, BLUE];

/// Configuration for [`BreakoutEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakoutConfig {
    /// Playfield width in cells.
    pub width: u32,
    /// Playfield height in cells.
    pub height: u32,
    /// Paddle width in cells; clamped travel keeps it on the field.
    pub paddle_size: u32,
    /// Number of brick rows.
    pub brick_layers: u32,
    /// Empty rows between the ceiling and the first brick row.
    pub brick_offset: u32,
    /// Seed for the simulator's ChaCha8 randomness source.
    pub seed: u64,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 25,
            paddle_size: 30,
            brick_layers: 6,
            brick_offset: 4,
            seed: 0,
        }
    }
}

impl BreakoutConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.paddle_size == 0 {
            return Err(ConfigError::PaddleSizeZero);
        }
        if self.paddle_size > self.width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_size,
                field_width: self.width,
            });
        }
        if self.width < 2 {
            return Err(ConfigError::GeometryInvalid {
                reason: format!("playfield width must be at least 2, got {}", self.width),
            });
        }
        // The ball spawns one row under the brick band and must start
        // strictly above the paddle-contact row (height - 2).
        let spawn_row = self.brick_offset + self.brick_layers + 1;
        if spawn_row + 2 > self.height {
            return Err(ConfigError::GeometryInvalid {
                reason: format!(
                    "brick band through row {} leaves no room above the paddle in a field {} tall",
                    spawn_row, self.height
                ),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Ball {
    pos: Point,
    vel: (i32, i32),
}

impl Ball {
    fn spawn(config: &BreakoutConfig, rng: &mut EnvRng) -> Self {
        let x = rng.random_range(0..config.width) as i32;
        let y = (config.brick_offset + config.brick_layers + 1) as i32;
        let vel = SPAWN_VELOCITIES[rng.random_range(0..SPAWN_VELOCITIES.len())];
        Self {
            pos: Point::new(x, y),
            vel,
        }
    }

    /// The cell one velocity step ahead of the current position.
    fn ahead(&self) -> Point {
        self.pos.offset(self.vel.0, self.vel.1)
    }

    fn advance(&mut self) {
        self.pos = self.ahead();
    }
}

#[derive(Clone, Copy, Debug)]
struct Paddle {
    x_start: i32,
    x_end: i32,
    row: i32,
}

impl Paddle {
    fn spawn(width: u32, size: u32, row: i32) -> Self {
        let x_start = (width / 2 - size / 2) as i32;
        Self {
            x_start,
            x_end: x_start + size as i32 - 1,
            row,
        }
    }

    fn shift_right(&mut self, width: i32) {
        if self.x_end != width - 1 {
            self.x_start += 1;
            self.x_end += 1;
        }
    }

    fn shift_left(&mut self) {
        if self.x_start != 0 {
            self.x_start -= 1;
            self.x_end -= 1;
        }
    }

    fn spans(&self, x: i32) -> bool {
        self.x_start <= x && x <= self.x_end
    }
}

/// The brick band: `layers * width` cells, destroyed in place.
#[derive(Clone, Debug)]
struct BrickGrid {
    offset: i32,
    layers: i32,
    width: i32,
    destroyed: Vec<bool>,
}

impl BrickGrid {
    fn new(offset: u32, layers: u32, width: u32) -> Self {
        Self {
            offset: offset as i32,
            layers: layers as i32,
            width: width as i32,
            destroyed: vec![false; (layers as usize) * (width as usize)],
        }
    }

    /// Whether `row` lies inside the brick band.
    fn band_contains(&self, row: i32) -> bool {
        row >= self.offset && row < self.offset + self.layers
    }

    fn index(&self, cell: Point) -> Option<usize> {
        if !self.band_contains(cell.y) || cell.x < 0 || cell.x >= self.width {
            return None;
        }
        Some(((cell.y - self.offset) * self.width + cell.x) as usize)
    }

    fn is_intact(&self, cell: Point) -> bool {
        self.index(cell).is_some_and(|i| !self.destroyed[i])
    }

    fn destroy(&mut self, cell: Point) {
        if let Some(i) = self.index(cell) {
            self.destroyed[i] = true;
        }
    }

    fn intact_count(&self) -> usize {
        self.destroyed.iter().filter(|&&d| !d).count()
    }
}

/// The brick-breaking training environment.
///
/// See the [module docs](self) for the per-tick collision order.
pub struct BreakoutEnv {
    config: BreakoutConfig,
    grid: Grid,
    ball: Ball,
    paddle: Paddle,
    bricks: BrickGrid,
    rng: EnvRng,
}

impl BreakoutEnv {
    /// Build a simulator in a freshly-reset state.
    pub fn new(config: BreakoutConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rng_from_seed(config.seed))
    }

    /// Build with an explicit randomness source instead of the seeded
    /// default.
    pub fn with_rng(config: BreakoutConfig, mut rng: EnvRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let ball = Ball::spawn(&config, &mut rng);
        Ok(Self {
            config,
            grid,
            ball,
            paddle: Self::paddle_for(&config),
            bricks: BrickGrid::new(config.brick_offset, config.brick_layers, config.width),
            rng,
        })
    }

    fn paddle_for(config: &BreakoutConfig) -> Paddle {
        Paddle::spawn(config.width, config.paddle_size, config.height as i32 - 1)
    }

    /// Bricks still standing.
    pub fn intact_bricks(&self) -> usize {
        self.bricks.intact_count()
    }

    fn width(&self) -> i32 {
        self.grid.width() as i32
    }

    fn height(&self) -> i32 {
        self.grid.height() as i32
    }

    /// Invert the horizontal velocity when the ball presses into a
    /// side wall.
    fn bounce_side_walls(&mut self) {
        let at_left = self.ball.pos.x == 0 && self.ball.vel.0 == -1;
        let at_right = self.ball.pos.x == self.width() - 1 && self.ball.vel.0 == 1;
        if at_left || at_right {
            self.ball.vel.0 = -self.ball.vel.0;
        }
    }
}

impl Environment for BreakoutEnv {
    type Action = Action;

    fn name(&self) -> &'static str {
        "breakout"
    }

    fn reset(&mut self) -> Observation {
        self.bricks = BrickGrid::new(
            self.config.brick_offset,
            self.config.brick_layers,
            self.config.width,
        );
        self.ball = Ball::spawn(&self.config, &mut self.rng);
        self.paddle = Self::paddle_for(&self.config);
        self.state()
    }

    fn step(&mut self, action: Action) -> Step {
        let mut reward = 0.0;

        // 1. Paddle move. Actions outside the pool leave it in place.
        let width = self.width();
        match action {
            Action::Left => self.paddle.shift_left(),
            Action::Right => self.paddle.shift_right(width),
            _ => {}
        }

        // 2. Side walls.
        self.bounce_side_walls();

        // 3. Ceiling.
        if self.ball.pos.y == 0 {
            self.ball.vel.1 = -self.ball.vel.1;
        }

        // 4. Paddle contact, one row above the paddle: bank away from
        // the paddle centre.
        if self.ball.pos.y == self.paddle.row - 1 && self.paddle.spans(self.ball.pos.x) {
            reward += REWARD_RETURN;
            let centre = self.paddle.x_end - self.config.paddle_size as i32 / 2;
            self.ball.vel = if self.ball.pos.x <= centre {
                (-1, -1)
            } else {
                (1, -1)
            };
        }

        // 5. Bricks, against the prospective cell. The straight hit
        // (current column, next row) shadows the diagonal one.
        let ahead = self.ball.ahead();
        if self.bricks.band_contains(ahead.y) {
            let straight = Point::new(self.ball.pos.x, ahead.y);
            if self.bricks.is_intact(straight) {
                self.bricks.destroy(straight);
                self.ball.vel.1 = -self.ball.vel.1;
            } else if self.bricks.is_intact(ahead) {
                self.bricks.destroy(ahead);
                self.ball.vel.0 = -self.ball.vel.0;
                self.ball.vel.1 = -self.ball.vel.1;
            }
        }

        // 6. A brick bounce can point the ball back into a side wall.
        self.bounce_side_walls();

        // 7. Movement gating: holding still against an intact brick
        // instead of tunnelling through it.
        let ahead = self.ball.ahead();
        let blocked = self.bricks.band_contains(ahead.y) && self.bricks.is_intact(ahead);
        if !blocked {
            self.ball.advance();
        }

        // 8. Floor.
        let done = self.ball.pos.y == self.height() - 1;
        if done {
            reward += REWARD_MISS;
        }

        Step {
            observation: self.state(),
            reward,
            done,
            score: None,
        }
    }

    fn state(&self) -> Observation {
        let w = (self.width() - 1) as f32;
        let h = (self.height() - 1) as f32;
        vec![
            self.paddle.x_start as f32 / w,
            self.paddle.x_end as f32 / w,
            self.ball.pos.x as f32 / w,
            self.ball.pos.y as f32 / h,
        ]
    }

    fn screenshot(&self) -> Frame {
        let mut frame = Frame::new(self.grid.width(), self.grid.height());
        for row in 0..self.bricks.layers {
            let colour = LAYER_COLOURS[row as usize % LAYER_COLOURS.len()];
            for col in 0..self.bricks.width {
                let cell = Point::new(col, row + self.bricks.offset);
                if self.bricks.is_intact(cell) {
                    frame.set(col as u32, cell.y as u32, colour);
                }
            }
        }
        frame.set(self.ball.pos.x as u32, self.ball.pos.y as u32, RED);
        for x in self.paddle.x_start..=self.paddle.x_end {
            frame.set(x as u32, self.paddle.row as u32, RED);
        }
        frame
    }

    fn observation_len(&self) -> usize {
        OBSERVATION_LEN
    }
}

impl DiscreteActions for BreakoutEnv {
    fn action_pool(&self) -> ActionPool {
        ACTIONS
    }
}
