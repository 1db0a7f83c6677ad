//! The snake-growth simulator.
//!
//! A snake of grid cells chases a food cell on an odd square grid. The
//! snake grows by one cell per food eaten and dies on contact with a
//! wall or its own body. An action that exactly reverses the snake's
//! last committed direction is overridden by that direction — a snake
//! cannot fold back into its own neck.
//!
//! Observation encoding (12 values, all `f32`): food displacement
//! `(head - food) / grid_size` (2), head position `((x+1)/g, (y+1)/g)`
//! (2), then eight compass rays clockwise from Up, each the normalized
//! distance to the nearest body cell in that direction, or `1.0` when
//! the ray leaves the grid first.

use crate::{rng_from_seed, EnvRng};
use indexmap::IndexSet;
use rand::Rng;
use smallvec::SmallVec;
use std::collections::VecDeque;
use warren_core::{Action, ActionPool, ConfigError};
use warren_env::{DiscreteActions, Environment, Observation, Step};
use warren_grid::{Frame, Grid, Point, Rgb};

/// Reward for reaching the food cell.
const REWARD_FOOD: f32 = 10.0;
/// Reward for an ordinary move; mildly negative to discourage stalling.
const REWARD_MOVE: f32 = -0.1;
/// Reward for dying against a wall or the snake's own body.
const REWARD_DEATH: f32 = -1.0;

/// Length of the observation vector.
const OBSERVATION_LEN: usize = 12;

/// The eight vision-ray directions, clockwise from Up.
const VISION_RAYS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// The snake accepts all four directions.
const ACTIONS: ActionPool = ActionPool::new(&Action::ALL);

const FOOD_COLOUR: Rgb = [0, 255, 127];
const HEAD_COLOUR: Rgb = [0, 191, 255];
const BODY_COLOUR: Rgb = [65, 105, 225];

/// Configuration for [`SnakeEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeConfig {
    /// Side length of the square grid. Must be odd (the spawn is
    /// centred) and at least 3.
    pub grid_size: u32,
    /// Seed for the simulator's ChaCha8 randomness source.
    pub seed: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 7,
            seed: 0,
        }
    }
}

impl SnakeConfig {
    /// Smallest accepted grid side length.
    pub const MIN_GRID_SIZE: u32 = 3;

    fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < Self::MIN_GRID_SIZE {
            return Err(ConfigError::GridSizeTooSmall {
                size: self.grid_size,
                min: Self::MIN_GRID_SIZE,
            });
        }
        if self.grid_size % 2 == 0 {
            return Err(ConfigError::GridSizeEven {
                size: self.grid_size,
            });
        }
        Ok(())
    }
}

/// The snake body: an ordered cell sequence from head to tail, plus a
/// membership mirror for O(1) occupancy queries.
///
/// The mirror is updated only inside [`grow`](Snake::grow) and
/// [`advance`](Snake::advance); nothing else mutates either structure,
/// so the two cannot diverge.
#[derive(Clone, Debug)]
struct Snake {
    /// Head first, tail last.
    cells: VecDeque<Point>,
    lookup: IndexSet<Point>,
    /// The last direction actually committed (reversals never commit).
    last_action: Action,
}

impl Snake {
    /// Two vertically adjacent cells at the grid centre, facing up.
    fn spawn(grid_size: u32) -> Self {
        let mid = (grid_size / 2) as i32;
        let cells: VecDeque<Point> =
            [Point::new(mid, mid), Point::new(mid, mid + 1)].into_iter().collect();
        let lookup = cells.iter().copied().collect();
        Self {
            cells,
            lookup,
            last_action: Action::Up,
        }
    }

    fn head(&self) -> Point {
        self.cells[0]
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn contains(&self, cell: Point) -> bool {
        self.lookup.contains(&cell)
    }

    /// Resolve the 180°-turn override: an exact reversal of the last
    /// committed direction is replaced by that direction.
    fn effective(&self, action: Action) -> Action {
        if action == self.last_action.opposite() {
            self.last_action
        } else {
            action
        }
    }

    /// The cell the head would enter under `action`.
    fn next_cell(&self, action: Action) -> Point {
        self.head().step(self.effective(action))
    }

    /// Insert a new head, keep the tail (the food move).
    fn grow(&mut self, action: Action) {
        let action = self.effective(action);
        let next = self.head().step(action);
        self.cells.push_front(next);
        self.lookup.insert(next);
        self.last_action = action;
    }

    /// Insert a new head, drop the tail (the ordinary move).
    fn advance(&mut self, action: Action) {
        self.grow(action);
        if let Some(tail) = self.cells.pop_back() {
            self.lookup.shift_remove(&tail);
        }
    }
}

/// The snake-growth training environment.
///
/// See the [module docs](self) for rules and observation encoding.
pub struct SnakeEnv {
    grid: Grid,
    snake: Snake,
    food: Point,
    score: u32,
    rng: EnvRng,
}

impl SnakeEnv {
    /// Build a simulator in a freshly-reset state.
    ///
    /// Fails when the grid size is even or below
    /// [`SnakeConfig::MIN_GRID_SIZE`].
    pub fn new(config: SnakeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rng_from_seed(config.seed))
    }

    /// Build with an explicit randomness source instead of the seeded
    /// default.
    pub fn with_rng(config: SnakeConfig, rng: EnvRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::square(config.grid_size);
        let mut env = Self {
            grid,
            snake: Snake::spawn(config.grid_size),
            food: Point::new(0, 0),
            score: 0,
            rng,
        };
        env.spawn_food();
        Ok(env)
    }

    /// Food eaten this episode.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Respawn the food uniformly over the free cells, enumerated in
    /// row-major order.
    fn spawn_food(&mut self) {
        let free: Vec<Point> = self
            .grid
            .cells()
            .filter(|&cell| !self.snake.contains(cell))
            .collect();
        // Nowhere to respawn once the body covers the grid; any further
        // step collides, so the stale food cell is unreachable.
        if free.is_empty() {
            return;
        }
        let index = self.rng.random_range(0..free.len());
        self.food = free[index];
    }

    fn grid_size(&self) -> f32 {
        self.grid.width() as f32
    }

    fn ray_distance(&self, dx: i32, dy: i32) -> f32 {
        let mut pos = self.snake.head();
        let mut dist = 0u32;
        loop {
            pos = pos.offset(dx, dy);
            dist += 1;
            if self.snake.contains(pos) {
                return dist as f32 / self.grid_size();
            }
            if !self.grid.contains(pos) {
                return 1.0;
            }
        }
    }

    fn compass_rays(&self) -> SmallVec<[f32; 8]> {
        VISION_RAYS
            .iter()
            .map(|&(dx, dy)| self.ray_distance(dx, dy))
            .collect()
    }
}

impl Environment for SnakeEnv {
    type Action = Action;

    fn name(&self) -> &'static str {
        "snake"
    }

    fn reset(&mut self) -> Observation {
        self.score = 0;
        self.snake = Snake::spawn(self.grid.width());
        self.spawn_food();
        self.state()
    }

    fn step(&mut self, action: Action) -> Step {
        let next = self.snake.next_cell(action);

        if !self.grid.contains(next) || self.snake.contains(next) {
            // The state is not advanced past a fatal collision.
            return Step {
                observation: self.state(),
                reward: REWARD_DEATH,
                done: true,
                score: Some(self.score),
            };
        }

        let reward = if next == self.food {
            self.snake.grow(action);
            self.score += 1;
            self.spawn_food();
            REWARD_FOOD
        } else {
            self.snake.advance(action);
            REWARD_MOVE
        };

        Step {
            observation: self.state(),
            reward,
            done: false,
            score: Some(self.score),
        }
    }

    fn state(&self) -> Observation {
        let g = self.grid_size();
        let head = self.snake.head();

        let mut obs = Vec::with_capacity(OBSERVATION_LEN);
        obs.push((head.x - self.food.x) as f32 / g);
        obs.push((head.y - self.food.y) as f32 / g);
        obs.push((head.x + 1) as f32 / g);
        obs.push((head.y + 1) as f32 / g);
        obs.extend(self.compass_rays());
        obs
    }

    fn screenshot(&self) -> Frame {
        let mut frame = Frame::new(self.grid.width(), self.grid.height());
        frame.set(self.food.x as u32, self.food.y as u32, FOOD_COLOUR);
        for (idx, cell) in self.snake.cells.iter().enumerate() {
            let colour = if idx == 0 { HEAD_COLOUR } else { BODY_COLOUR };
            frame.set(cell.x as u32, cell.y as u32, colour);
        }
        frame
    }

    fn observation_len(&self) -> usize {
        OBSERVATION_LEN
    }
}

impl DiscreteActions for SnakeEnv {
    fn action_pool(&self) -> ActionPool {
        ACTIONS
    }
}
