//! The two-paddle ball duel.
//!
//! A 16×9 field with a 3-cell paddle on each side. Paddles move
//! vertically inside an inner band; the ball bounces off the band edges
//! and off a paddle when its column matches the paddle's collision
//! column and its row falls within the paddle span. A ball crossing
//! either horizontal boundary ends the episode.
//!
//! Reward attribution: the reward stream belongs to the **left**
//! (learning) side — `+1` for a left-paddle return, nothing for a
//! right-paddle return, `-1` when the ball exits past either boundary.
//!
//! [`PongEnv`] steps with a `(left, right)` action pair;
//! [`SoloPongEnv`] drives the right paddle with a deterministic tracker
//! that moves one row towards the ball each tick.

use crate::{rng_from_seed, EnvRng};
use rand::Rng;
use std::cmp::Ordering;
use warren_core::{Action, ActionPool};
use warren_env::{DiscreteActions, Environment, Observation, Step};
use warren_grid::{Frame, Grid, Point, Rgb};

/// Playfield width in cells.
const WIDTH: i32 = 16;
/// Playfield height in cells.
const HEIGHT: i32 = 9;

/// Column where the ball meets the left paddle.
const LEFT_HIT_COL: i32 = 2;
/// Column where the ball meets the right paddle.
const RIGHT_HIT_COL: i32 = 13;
/// Column the left paddle renders in.
const LEFT_DRAW_COL: u32 = 1;
/// Column the right paddle renders in.
const RIGHT_DRAW_COL: u32 = 14;

/// Highest row a paddle centre can reach (span stays on the field).
const PADDLE_MIN_ROW: i32 = 1;
/// Lowest row a paddle centre can reach.
const PADDLE_MAX_ROW: i32 = HEIGHT - 2;
/// Paddle centre at reset.
const PADDLE_SPAWN_ROW: i32 = 4;

/// Reward for a left-paddle return.
const REWARD_RETURN: f32 = 1.0;
/// Reward subtracted when the ball exits past either boundary.
const REWARD_EXIT: f32 = -1.0;

/// Length of the observation vector.
const OBSERVATION_LEN: usize = 4;

/// A paddle accepts vertical moves only.
const ACTIONS: ActionPool = ActionPool::new(&[Action::Up, Action::Down]);

const WHITE: Rgb = [255, 255, 255];

/// Configuration for [`PongEnv`] and [`SoloPongEnv`].
///
/// The field geometry is fixed; only the randomness seed varies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PongConfig {
    /// Seed for the simulator's ChaCha8 randomness source.
    pub seed: u64,
}

#[derive(Clone, Copy, Debug)]
struct Ball {
    pos: Point,
    vel: (i32, i32),
}

impl Ball {
    /// Spawn inside the middle band, heading for the farther side.
    fn spawn(rng: &mut EnvRng) -> Self {
        let x = rng.random_range(3..13);
        let y = rng.random_range(0..HEIGHT);
        let vx = if x < WIDTH / 2 { 1 } else { -1 };
        let vy = [1, -1][rng.random_range(0..2usize)];
        Self {
            pos: Point::new(x, y),
            vel: (vx, vy),
        }
    }

    fn advance(&mut self) {
        self.pos = self.pos.offset(self.vel.0, self.vel.1);
    }
}

#[derive(Clone, Copy, Debug)]
struct Paddle {
    /// Centre row; the paddle occupies `row - 1 ..= row + 1`.
    row: i32,
}

impl Paddle {
    fn spawn() -> Self {
        Self {
            row: PADDLE_SPAWN_ROW,
        }
    }

    /// Move one row inside the inner band; other actions are no-ops.
    fn apply(&mut self, action: Action) {
        match action {
            Action::Up => {
                if self.row != PADDLE_MIN_ROW {
                    self.row -= 1;
                }
            }
            Action::Down => {
                if self.row != PADDLE_MAX_ROW {
                    self.row += 1;
                }
            }
            _ => {}
        }
    }

    /// Whether `y` falls within the 3-cell span.
    fn spans(&self, y: i32) -> bool {
        (self.row - 1..=self.row + 1).contains(&y)
    }
}

/// The two-paddle training environment.
///
/// See the [module docs](self) for rules and reward attribution.
pub struct PongEnv {
    ball: Ball,
    left: Paddle,
    right: Paddle,
    grid: Grid,
    rng: EnvRng,
}

impl PongEnv {
    /// Build a simulator in a freshly-reset state.
    pub fn new(config: PongConfig) -> Self {
        Self::with_rng(rng_from_seed(config.seed))
    }

    /// Build with an explicit randomness source instead of the seeded
    /// default.
    pub fn with_rng(mut rng: EnvRng) -> Self {
        let ball = Ball::spawn(&mut rng);
        Self {
            ball,
            left: Paddle::spawn(),
            right: Paddle::spawn(),
            grid: Grid::new(WIDTH as u32, HEIGHT as u32),
            rng,
        }
    }

    /// One tick; `right` is `None` when the right paddle holds still.
    fn tick(&mut self, left: Action, right: Option<Action>) -> Step {
        let mut reward = 0.0;

        self.left.apply(left);
        if let Some(action) = right {
            self.right.apply(action);
        }

        // Band-edge bounce.
        let at_top = self.ball.pos.y == 0 && self.ball.vel.1 == -1;
        let at_bottom = self.ball.pos.y == HEIGHT - 1 && self.ball.vel.1 == 1;
        if at_top || at_bottom {
            self.ball.vel.1 = -self.ball.vel.1;
        }

        // Paddle-column hits. Only the left return is credited.
        if self.ball.pos.x == LEFT_HIT_COL {
            if self.left.spans(self.ball.pos.y) {
                self.ball.vel.0 = -self.ball.vel.0;
                reward += REWARD_RETURN;
            }
        } else if self.ball.pos.x == RIGHT_HIT_COL && self.right.spans(self.ball.pos.y) {
            self.ball.vel.0 = -self.ball.vel.0;
        }

        self.ball.advance();

        let done = self.ball.pos.x == 0 || self.ball.pos.x == WIDTH - 1;
        if done {
            reward += REWARD_EXIT;
        }

        Step {
            observation: self.state(),
            reward,
            done,
            score: None,
        }
    }
}

impl Environment for PongEnv {
    type Action = (Action, Action);

    fn name(&self) -> &'static str {
        "pong"
    }

    fn reset(&mut self) -> Observation {
        self.ball = Ball::spawn(&mut self.rng);
        self.left = Paddle::spawn();
        self.right = Paddle::spawn();
        self.state()
    }

    fn step(&mut self, (left, right): (Action, Action)) -> Step {
        self.tick(left, Some(right))
    }

    fn state(&self) -> Observation {
        vec![
            self.left.row as f32 / HEIGHT as f32,
            self.ball.pos.x as f32 / WIDTH as f32,
            self.ball.pos.y as f32 / HEIGHT as f32,
            self.right.row as f32 / HEIGHT as f32,
        ]
    }

    fn screenshot(&self) -> Frame {
        let mut frame = Frame::new(self.grid.width(), self.grid.height());
        for dy in -1..=1 {
            frame.set(LEFT_DRAW_COL, (self.left.row + dy) as u32, WHITE);
            frame.set(RIGHT_DRAW_COL, (self.right.row + dy) as u32, WHITE);
        }
        frame.set(self.ball.pos.x as u32, self.ball.pos.y as u32, WHITE);
        frame
    }

    fn observation_len(&self) -> usize {
        OBSERVATION_LEN
    }
}

/// Single-agent Pong: the right paddle tracks the ball one row per tick.
pub struct SoloPongEnv {
    inner: PongEnv,
}

impl SoloPongEnv {
    /// Build a simulator in a freshly-reset state.
    pub fn new(config: PongConfig) -> Self {
        Self {
            inner: PongEnv::new(config),
        }
    }

    /// Build with an explicit randomness source instead of the seeded
    /// default.
    pub fn with_rng(rng: EnvRng) -> Self {
        Self {
            inner: PongEnv::with_rng(rng),
        }
    }

    fn tracking_action(&self) -> Option<Action> {
        match self.inner.ball.pos.y.cmp(&self.inner.right.row) {
            Ordering::Less => Some(Action::Up),
            Ordering::Greater => Some(Action::Down),
            Ordering::Equal => None,
        }
    }
}

impl Environment for SoloPongEnv {
    type Action = Action;

    fn name(&self) -> &'static str {
        "pong-solo"
    }

    fn reset(&mut self) -> Observation {
        self.inner.reset()
    }

    fn step(&mut self, action: Action) -> Step {
        let right = self.tracking_action();
        self.inner.tick(action, right)
    }

    fn state(&self) -> Observation {
        self.inner.state()
    }

    fn screenshot(&self) -> Frame {
        self.inner.screenshot()
    }

    fn observation_len(&self) -> usize {
        OBSERVATION_LEN
    }
}

impl DiscreteActions for SoloPongEnv {
    fn action_pool(&self) -> ActionPool {
        ACTIONS
    }
}
