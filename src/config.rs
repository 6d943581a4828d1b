//! Board geometry and gameplay tuning
//!
//! Loaded from JSON by hosts that want a different board; every field falls
//! back to the compiled-in default when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Horizontal distance moved per tick while a direction is held
    pub paddle_speed: f32,
    pub paddle_bottom_margin: f32,
    pub paddle_deflection: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub launch_dy: f32,
    pub launch_dx_spread: f32,

    // === Bricks ===
    pub brick_columns: usize,
    pub brick_rows: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_left: f32,
    pub brick_offset_top: f32,
    pub palette: Vec<u32>,

    // === Rules ===
    pub points_per_brick: u32,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_deflection: PADDLE_DEFLECTION,

            ball_radius: BALL_RADIUS,
            launch_dy: LAUNCH_DY,
            launch_dx_spread: LAUNCH_DX_SPREAD,

            brick_columns: BRICK_COLUMNS,
            brick_rows: BRICK_ROWS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_left: BRICK_OFFSET_LEFT,
            brick_offset_top: BRICK_OFFSET_TOP,
            palette: BRICK_PALETTE.to_vec(),

            points_per_brick: POINTS_PER_BRICK,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Top edge of the paddle (fixed for the whole game)
    pub fn paddle_y(&self) -> f32 {
        self.board_height - self.paddle_bottom_margin - self.paddle_height
    }

    /// Largest legal paddle x
    pub fn paddle_max_x(&self) -> f32 {
        self.board_width - self.paddle_width
    }

    /// Bricks in a full grid, `None` if the product overflows
    pub fn brick_count(&self) -> Option<usize> {
        self.brick_columns.checked_mul(self.brick_rows)
    }

    /// Right and bottom edges of the laid-out brick grid
    pub fn brick_grid_extent(&self) -> (f32, f32) {
        let cols = self.brick_columns as f32;
        let rows = self.brick_rows as f32;
        let right = self.brick_offset_left + cols * (self.brick_width + self.brick_padding)
            - self.brick_padding;
        let bottom = self.brick_offset_top + rows * (self.brick_height + self.brick_padding)
            - self.brick_padding;
        (right, bottom)
    }

    /// Reject geometry the simulation cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        // Offsets and spreads may be zero, but not negative
        let non_negative = [
            ("paddle_bottom_margin", self.paddle_bottom_margin),
            ("paddle_deflection", self.paddle_deflection),
            ("launch_dx_spread", self.launch_dx_spread),
            ("brick_padding", self.brick_padding),
            ("brick_offset_left", self.brick_offset_left),
            ("brick_offset_top", self.brick_offset_top),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !(self.launch_dy.is_finite() && self.launch_dy < 0.0) {
            return Err(ConfigError::NonPositive {
                field: "launch_dy (upward magnitude)",
                value: -self.launch_dy,
            });
        }

        match self.brick_count() {
            None => {
                return Err(ConfigError::GridTooLarge {
                    columns: self.brick_columns,
                    rows: self.brick_rows,
                });
            }
            Some(0) => {
                return Err(ConfigError::EmptyBrickGrid {
                    columns: self.brick_columns,
                    rows: self.brick_rows,
                });
            }
            Some(_) => {}
        }
        if self.paddle_width >= self.board_width {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: self.paddle_width,
                board_width: self.board_width,
            });
        }
        let paddle_y = self.paddle_y();
        if paddle_y < 0.0 {
            return Err(ConfigError::PaddleOffBoard {
                paddle_y,
                board_height: self.board_height,
            });
        }
        let (right, bottom) = self.brick_grid_extent();
        if right > self.board_width || bottom > paddle_y {
            return Err(ConfigError::BricksOverflow {
                right,
                bottom,
                board_width: self.board_width,
                board_height: self.board_height,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        Ok(())
    }
}
