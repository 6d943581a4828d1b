//! Presentation collaborators
//!
//! The engine paints through `Renderer` and publishes HUD text through
//! `UiReporter`. Both are called synchronously from `GameEngine::tick`; the
//! engine never reads anything back.

pub mod ascii;

pub use ascii::AsciiRenderer;

use glam::Vec2;
use serde::Serialize;

use crate::sim::Rect;

/// Draw calls for one frame
pub trait Renderer {
    fn clear(&mut self);
    fn draw_brick(&mut self, rect: Rect, color: u32);
    fn draw_paddle(&mut self, rect: Rect);
    fn draw_ball(&mut self, center: Vec2, radius: f32);
    /// Terminal overlay, drawn once when the run ends
    fn draw_banner(&mut self, text: &str, subtext: &str);
}

/// Score and lives readouts
pub trait UiReporter {
    fn report_score(&mut self, score: u32);
    fn report_lives(&mut self, lives: u32);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn clear(&mut self) {
        (**self).clear();
    }
    fn draw_brick(&mut self, rect: Rect, color: u32) {
        (**self).draw_brick(rect, color);
    }
    fn draw_paddle(&mut self, rect: Rect) {
        (**self).draw_paddle(rect);
    }
    fn draw_ball(&mut self, center: Vec2, radius: f32) {
        (**self).draw_ball(center, radius);
    }
    fn draw_banner(&mut self, text: &str, subtext: &str) {
        (**self).draw_banner(text, subtext);
    }
}

impl<U: UiReporter + ?Sized> UiReporter for &mut U {
    fn report_score(&mut self, score: u32) {
        (**self).report_score(score);
    }
    fn report_lives(&mut self, lives: u32) {
        (**self).report_lives(lives);
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Brick { rect: Rect, color: u32 },
    Paddle { rect: Rect },
    Ball { center: (f32, f32), radius: f32 },
    Banner { text: String, subtext: String },
}

/// Records draw calls and reports instead of painting anything
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameRecorder {
    /// Commands since the last `clear()`
    pub frame: Vec<DrawCommand>,
    /// Number of `clear()` calls seen
    pub frames: u64,
    /// Every banner ever drawn, in order
    pub banners: Vec<(String, String)>,
    pub score: Option<u32>,
    pub lives: Option<u32>,
    /// Number of score reports seen
    pub reports: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bricks_drawn(&self) -> usize {
        self.frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Brick { .. }))
            .count()
    }
}

impl Renderer for FrameRecorder {
    fn clear(&mut self) {
        self.frame.clear();
        self.frames += 1;
    }

    fn draw_brick(&mut self, rect: Rect, color: u32) {
        self.frame.push(DrawCommand::Brick { rect, color });
    }

    fn draw_paddle(&mut self, rect: Rect) {
        self.frame.push(DrawCommand::Paddle { rect });
    }

    fn draw_ball(&mut self, center: Vec2, radius: f32) {
        self.frame.push(DrawCommand::Ball {
            center: (center.x, center.y),
            radius,
        });
    }

    fn draw_banner(&mut self, text: &str, subtext: &str) {
        self.frame.push(DrawCommand::Banner {
            text: text.to_string(),
            subtext: subtext.to_string(),
        });
        self.banners.push((text.to_string(), subtext.to_string()));
    }
}

impl UiReporter for FrameRecorder {
    fn report_score(&mut self, score: u32) {
        self.score = Some(score);
        self.reports += 1;
    }

    fn report_lives(&mut self, lives: u32) {
        self.lives = Some(lives);
    }
}

/// Logs score/lives whenever they change
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    last_score: Option<u32>,
    last_lives: Option<u32>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UiReporter for LogReporter {
    fn report_score(&mut self, score: u32) {
        if self.last_score != Some(score) {
            log::debug!("Score: {}", score);
            self.last_score = Some(score);
        }
    }

    fn report_lives(&mut self, lives: u32) {
        if self.last_lives != Some(lives) {
            log::debug!("Lives: {}", lives);
            self.last_lives = Some(lives);
        }
    }
}
