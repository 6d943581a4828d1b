//! Game state and core simulation types
//!
//! Everything the engine mutates lives here and is serialisable, so a host can
//! snapshot a frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, never started
    Idle,
    /// Active gameplay (ball carried or free)
    Running,
    /// Frozen until the next pause toggle
    Paused,
    /// Out of lives
    GameOver,
    /// Every brick destroyed
    Won,
}

impl GamePhase {
    /// Run ended, waiting for `start()`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge, fixed for the game
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    /// Centred on the board
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: (config.board_width - config.paddle_width) / 2.0,
            y: config.paddle_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move by `delta`, clamped to `[0, max_x]`
    pub fn shift(&mut self, delta: f32, max_x: f32) {
        self.x = (self.x + delta).clamp(0.0, max_x);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Carried by the paddle, not yet launched
    pub on_paddle: bool,
}

impl Ball {
    pub fn new(radius: f32, paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            on_paddle: true,
        };
        ball.attach(paddle);
        ball
    }

    /// Put the ball back on the paddle, resting on its top edge
    pub fn attach(&mut self, paddle: &Paddle) {
        self.on_paddle = true;
        self.vel = Vec2::ZERO;
        self.pos = Vec2::new(paddle.center_x(), paddle.y - self.radius);
    }

    /// Keep a carried ball centred on the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        if self.on_paddle {
            self.pos.x = paddle.center_x();
        }
    }

    /// Release from the paddle with the given velocity
    pub fn launch(&mut self, vel: Vec2) {
        if self.on_paddle {
            self.on_paddle = false;
            self.vel = vel;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// Brick status; only ever goes Alive -> Destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive,
    Destroyed,
}

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub column: usize,
    pub row: usize,
    pub rect: Rect,
    /// Cosmetic, 0xRRGGBB
    pub color: u32,
    pub status: BrickStatus,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }
}

/// Fixed-size grid of bricks, stored column-major
///
/// Iteration order is columns outer, rows inner, both ascending. Collision
/// resolution depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Lay out a fully alive grid
    pub fn new(config: &GameConfig) -> Self {
        let columns = config.brick_columns;
        let rows = config.brick_rows;
        let mut bricks = Vec::with_capacity(config.brick_count().unwrap_or(0));
        for column in 0..columns {
            for row in 0..rows {
                let x = column as f32 * (config.brick_width + config.brick_padding)
                    + config.brick_offset_left;
                let y = row as f32 * (config.brick_height + config.brick_padding)
                    + config.brick_offset_top;
                // Validation guarantees a non-empty palette
                let color = config
                    .palette
                    .get(row % config.palette.len().max(1))
                    .copied()
                    .unwrap_or(0xFFFFFF);
                bricks.push(Brick {
                    column,
                    row,
                    rect: Rect::new(x, y, config.brick_width, config.brick_height),
                    color,
                    status: BrickStatus::Alive,
                });
            }
        }
        Self {
            columns,
            rows,
            bricks,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Brick> {
        if column < self.columns && row < self.rows {
            self.bricks.get(column * self.rows + row)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Brick> {
        if column < self.columns && row < self.rows {
            self.bricks.get_mut(column * self.rows + row)
        } else {
            None
        }
    }

    /// All bricks in scan order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub input: InputState,
    /// Ticks simulated since the last start
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh state in the Idle phase
    pub fn new(config: &GameConfig) -> Self {
        let paddle = Paddle::new(config);
        let ball = Ball::new(config.ball_radius, &paddle);
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: config.starting_lives,
            paddle,
            ball,
            bricks: BrickGrid::new(config),
            input: InputState::default(),
            time_ticks: 0,
        }
    }

    /// Reset everything for a new run and enter Running
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
        self.phase = GamePhase::Running;
    }
}
