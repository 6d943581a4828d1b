//! Per-tick simulation steps
//!
//! `GameEngine::tick` runs these in order while the phase is Running. Each step
//! reads what the previous one wrote.

use super::collision::{ball_hits_paddle, paddle_bounce_dx, reflect_off_walls, wall_contact};
use super::state::{BrickStatus, GamePhase, GameState};
use crate::config::GameConfig;

/// What happened to the ball during the ball step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    /// Carried by the paddle, not moved
    Carried,
    Moving,
    PaddleHit,
    /// Fell past the bottom with lives to spare; now back on the paddle
    LifeLost,
    /// Fell past the bottom on the last life
    OutOfLives,
}

/// Step 1: move the paddle per held keys, carry the ball along
pub fn update_paddle(state: &mut GameState, config: &GameConfig) {
    let max_x = config.paddle_max_x();
    let paddle = &mut state.paddle;
    if state.input.left && paddle.x > 0.0 {
        paddle.shift(-paddle.speed, max_x);
    }
    if state.input.right && paddle.x < max_x {
        paddle.shift(paddle.speed, max_x);
    }
    state.ball.follow(&state.paddle);
}

/// Step 2: advance a free ball and resolve walls, paddle and the bottom edge
pub fn update_ball(state: &mut GameState, config: &GameConfig) -> BallOutcome {
    let ball = &mut state.ball;
    if ball.on_paddle {
        return BallOutcome::Carried;
    }

    ball.pos += ball.vel;

    let contact = wall_contact(ball.pos, ball.radius, config.board_width, config.board_height);
    ball.vel = reflect_off_walls(ball.vel, contact);

    let paddle_rect = state.paddle.rect();
    if ball_hits_paddle(ball.pos, ball.radius, &paddle_rect) {
        ball.vel.x = paddle_bounce_dx(ball.pos.x, &paddle_rect, config.paddle_deflection);
        ball.vel.y = -ball.vel.y.abs();
        return BallOutcome::PaddleHit;
    }

    if contact.bottom {
        state.lives = state.lives.saturating_sub(1);
        if state.lives > 0 {
            ball.attach(&state.paddle);
            return BallOutcome::LifeLost;
        }
        state.phase = GamePhase::GameOver;
        return BallOutcome::OutOfLives;
    }

    BallOutcome::Moving
}

/// Step 3: destroy every alive brick the ball overlaps
///
/// Scans the whole grid without stopping at the first hit; each hit flips dy
/// again. Returns the number of bricks destroyed and enters Won when none
/// remain.
pub fn collide_bricks(state: &mut GameState, config: &GameConfig) -> u32 {
    let bounds = state.ball.bounds();
    let mut destroyed = 0;
    for brick in state.bricks.iter_mut() {
        if brick.is_alive() && bounds.overlaps(&brick.rect) {
            state.ball.vel.y = -state.ball.vel.y;
            brick.status = BrickStatus::Destroyed;
            state.score += config.points_per_brick;
            destroyed += 1;
            log::debug!("Brick ({}, {}) destroyed", brick.column, brick.row);
        }
    }
    if state.bricks.all_destroyed() {
        state.phase = GamePhase::Won;
    }
    destroyed
}
