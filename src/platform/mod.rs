//! Platform abstraction layer
//!
//! Hosts translate their native events (DOM key codes, button clicks) into
//! `InputEvent`s and drive the engine through a `FrameLoop`:
//! - `autopilot`: demo-mode input source that plays the game
//! - `frame_loop`: explicit per-frame driver with `stop()`

pub mod autopilot;
pub mod frame_loop;

pub use autopilot::Autopilot;
pub use frame_loop::FrameLoop;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Logical keys the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Left,
    Right,
    Launch,
    Pause,
    Start,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(KeyCode::Left),
            "ArrowRight" | "KeyD" => Some(KeyCode::Right),
            "Space" | "ArrowUp" => Some(KeyCode::Launch),
            "KeyP" | "Escape" => Some(KeyCode::Pause),
            "Enter" => Some(KeyCode::Start),
            _ => None,
        }
    }
}

/// A discrete host event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Start/restart button
    StartPressed,
    /// Pause button
    PausePressed,
}

/// Something that feeds events to the engine, one frame at a time
pub trait InputSource {
    /// Next event pending for `frame`, `None` once drained
    ///
    /// `state` is the engine state as of the start of the frame's event
    /// processing.
    fn next_event(&mut self, frame: u64, state: &GameState) -> Option<InputEvent>;
}

/// No input at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn next_event(&mut self, _frame: u64, _state: &GameState) -> Option<InputEvent> {
        None
    }
}

/// Replays `(frame, event)` pairs; events are delivered on or after their frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(u64, InputEvent)>) -> Self {
        // Stable sort keeps same-frame events in the given order
        events.sort_by_key(|(frame, _)| *frame);
        Self {
            events: events.into(),
        }
    }

    pub fn push(&mut self, frame: u64, event: InputEvent) {
        let at = self.events.partition_point(|(f, _)| *f <= frame);
        self.events.insert(at, (frame, event));
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self, frame: u64, _state: &GameState) -> Option<InputEvent> {
        match self.events.front() {
            Some((at, _)) if *at <= frame => self.events.pop_front().map(|(_, e)| e),
            _ => None,
        }
    }
}
