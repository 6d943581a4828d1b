//! Explicit frame driver
//!
//! One `pump()` per display refresh: drain pending input, then tick once. The
//! loop keeps pumping whatever the game phase is until `stop()` is called; the
//! engine itself branches out early when it has nothing to simulate.

use super::InputSource;
use crate::renderer::{Renderer, UiReporter};
use crate::sim::{GameEngine, GameState};

#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    frame: u64,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames pumped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Halt the loop; later pumps do nothing
    pub fn stop(&mut self) {
        if !self.stopped {
            log::info!("Frame loop stopped at frame {}", self.frame);
        }
        self.stopped = true;
    }

    /// Run one frame. Returns `false` once stopped.
    pub fn pump<R, U, S>(&mut self, engine: &mut GameEngine<R, U>, input: &mut S) -> bool
    where
        R: Renderer,
        U: UiReporter,
        S: InputSource + ?Sized,
    {
        if self.stopped {
            return false;
        }
        while let Some(event) = input.next_event(self.frame, engine.state()) {
            engine.handle(event);
        }
        engine.tick();
        self.frame += 1;
        true
    }

    /// Pump until stopped or `max_frames` more frames have run
    pub fn run<R, U, S>(
        &mut self,
        engine: &mut GameEngine<R, U>,
        input: &mut S,
        max_frames: u64,
    ) -> u64
    where
        R: Renderer,
        U: UiReporter,
        S: InputSource + ?Sized,
    {
        self.run_until(engine, input, max_frames, |_| false)
    }

    /// Like `run`, calling `stop()` as soon as `done` holds after a frame
    pub fn run_until<R, U, S, F>(
        &mut self,
        engine: &mut GameEngine<R, U>,
        input: &mut S,
        max_frames: u64,
        mut done: F,
    ) -> u64
    where
        R: Renderer,
        U: UiReporter,
        S: InputSource + ?Sized,
        F: FnMut(&GameState) -> bool,
    {
        let mut ran = 0;
        while ran < max_frames && self.pump(engine, input) {
            ran += 1;
            if done(engine.state()) {
                self.stop();
            }
        }
        ran
    }
}
