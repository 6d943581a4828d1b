//! Demo mode: an input source that plays the game
//!
//! Holds left/right to keep the paddle under the ball with a slowly drifting
//! aim offset, so rallies don't lock into a perfect loop.

use std::collections::VecDeque;

use super::{InputEvent, InputSource, KeyCode};
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Start a new run after GameOver/Won
    restart: bool,
    /// Paddle-centre error tolerated before steering
    dead_zone: f32,
    held: Option<KeyCode>,
    pending: VecDeque<InputEvent>,
    planned_frame: Option<u64>,
}

impl Autopilot {
    pub fn new(restart: bool) -> Self {
        Self {
            restart,
            dead_zone: 4.0,
            held: None,
            pending: VecDeque::new(),
            planned_frame: None,
        }
    }

    fn hold(&mut self, key: Option<KeyCode>) {
        if self.held == key {
            return;
        }
        if let Some(old) = self.held {
            self.pending.push_back(InputEvent::KeyUp(old));
        }
        if let Some(new) = key {
            self.pending.push_back(InputEvent::KeyDown(new));
        }
        self.held = key;
    }

    fn plan(&mut self, frame: u64, state: &GameState) {
        match state.phase {
            GamePhase::Idle => {
                self.hold(None);
                self.pending.push_back(InputEvent::StartPressed);
            }
            GamePhase::GameOver | GamePhase::Won => {
                self.hold(None);
                if self.restart {
                    log::info!("Autopilot restarting after {:?}", state.phase);
                    self.pending.push_back(InputEvent::StartPressed);
                }
            }
            GamePhase::Paused => {}
            GamePhase::Running => {
                if state.ball.on_paddle {
                    self.hold(None);
                    self.pending.push_back(InputEvent::KeyDown(KeyCode::Launch));
                    return;
                }
                let drift = (frame as f32 * 0.02).sin() * state.paddle.width * 0.3;
                let error = state.ball.pos.x + drift - state.paddle.center_x();
                let key = if error < -self.dead_zone {
                    Some(KeyCode::Left)
                } else if error > self.dead_zone {
                    Some(KeyCode::Right)
                } else {
                    None
                };
                self.hold(key);
            }
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputSource for Autopilot {
    fn next_event(&mut self, frame: u64, state: &GameState) -> Option<InputEvent> {
        if self.planned_frame != Some(frame) {
            self.planned_frame = Some(frame);
            self.plan(frame, state);
        }
        self.pending.pop_front()
    }
}
