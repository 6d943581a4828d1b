//! Construction-time configuration errors
//!
//! The simulation itself has no failure modes; a bad `GameConfig` is the only
//! thing callers can get wrong.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// A size, speed or radius that must be a positive finite number
    NonPositive { field: &'static str, value: f32 },
    /// An offset, margin or spread that may be zero but not negative
    Negative { field: &'static str, value: f32 },
    EmptyBrickGrid { columns: usize, rows: usize },
    /// `columns * rows` does not fit in `usize`
    GridTooLarge { columns: usize, rows: usize },
    PaddleTooWide { paddle_width: f32, board_width: f32 },
    PaddleOffBoard { paddle_y: f32, board_height: f32 },
    BricksOverflow {
        right: f32,
        bottom: f32,
        board_width: f32,
        board_height: f32,
    },
    EmptyPalette,
    NoLives,
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be a positive finite number, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be a non-negative finite number, got {value}")
            }
            Self::EmptyBrickGrid { columns, rows } => {
                write!(f, "brick grid is empty: {columns} columns x {rows} rows")
            }
            Self::GridTooLarge { columns, rows } => {
                write!(f, "brick grid is too large: {columns} columns x {rows} rows")
            }
            Self::PaddleTooWide {
                paddle_width,
                board_width,
            } => write!(
                f,
                "paddle width {paddle_width} does not fit board width {board_width}"
            ),
            Self::PaddleOffBoard {
                paddle_y,
                board_height,
            } => write!(
                f,
                "paddle row y={paddle_y} lies outside board height {board_height}"
            ),
            Self::BricksOverflow {
                right,
                bottom,
                board_width,
                board_height,
            } => write!(
                f,
                "brick grid extends to ({right}, {bottom}), \
                 beyond board {board_width}x{board_height}"
            ),
            Self::EmptyPalette => write!(f, "brick palette has no colours"),
            Self::NoLives => write!(f, "starting lives must be at least 1"),
            Self::Parse(e) => write!(f, "invalid config JSON: {e}"),
            Self::Io(e) => write!(f, "could not read config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
