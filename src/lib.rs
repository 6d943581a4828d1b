//! Folio Breakout - the brick-breaker demo widget of a portfolio site
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, game phase)
//! - `renderer`: Draw/report collaborator traits and headless implementations
//! - `platform`: Input events, autopilot and the explicit frame loop
//! - `config`: Board geometry and gameplay tuning

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use sim::GameEngine;

/// Game configuration defaults
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between paddle bottom edge and board bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    /// dx range produced across the paddle face, centre hit = 0
    pub const PADDLE_DEFLECTION: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const LAUNCH_DY: f32 = -4.0;
    /// Launch dx is drawn from [-LAUNCH_DX_SPREAD, LAUNCH_DX_SPREAD)
    pub const LAUNCH_DX_SPREAD: f32 = 3.0;

    /// Brick grid defaults (8 x 5 = 40 bricks)
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_LEFT: f32 = 45.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;

    /// Row colours, indexed by row modulo length
    pub const BRICK_PALETTE: [u32; 5] = [0xFF595E, 0xFFCA3A, 0x8AC926, 0x1982C4, 0x6A4C93];

    /// Scoring
    pub const POINTS_PER_BRICK: u32 = 10;
    pub const STARTING_LIVES: u32 = 3;
}
