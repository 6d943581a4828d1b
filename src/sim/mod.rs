//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - Stable brick scan order (columns outer, rows inner)
//! - Rendering only through the `Renderer` / `UiReporter` traits

pub mod collision;
pub mod engine;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use engine::GameEngine;
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{Ball, Brick, BrickGrid, BrickStatus, GamePhase, GameState, InputState, Paddle};
pub use tick::BallOutcome;
