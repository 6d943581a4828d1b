//! Collision detection for axis-aligned geometry
//!
//! Everything here is plain AABB. The ball is treated as the square that
//! bounds its circle, and nothing is swept: a ball fast enough to jump over a
//! thin object in one tick passes through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square bounding a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Which walls a ball currently touches or has crossed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

/// Test a ball against the four board edges
pub fn wall_contact(pos: Vec2, radius: f32, board_width: f32, board_height: f32) -> WallContact {
    WallContact {
        left: pos.x - radius < 0.0,
        right: pos.x + radius > board_width,
        top: pos.y - radius < 0.0,
        bottom: pos.y + radius > board_height,
    }
}

/// Reflect velocity off side and top walls
///
/// Each axis is handled on its own, so a corner flips both components. The
/// sign is forced away from the wall rather than toggled so a ball that is
/// still outside on the next tick cannot oscillate.
pub fn reflect_off_walls(vel: Vec2, contact: WallContact) -> Vec2 {
    let mut vel = vel;
    if contact.left {
        vel.x = vel.x.abs();
    } else if contact.right {
        vel.x = -vel.x.abs();
    }
    if contact.top {
        vel.y = vel.y.abs();
    }
    vel
}

/// Does the ball overlap the paddle band, strictly inside its span?
///
/// A ball whose top edge is already below the paddle has been missed and
/// does not bounce off it.
pub fn ball_hits_paddle(pos: Vec2, radius: f32, paddle: &Rect) -> bool {
    pos.y + radius >= paddle.y
        && pos.y - radius <= paddle.bottom()
        && pos.x > paddle.x
        && pos.x < paddle.right()
}

/// Horizontal velocity after a paddle hit
///
/// Linear in hit position: left edge gives `-deflection / 2`, centre 0, right
/// edge `+deflection / 2`.
pub fn paddle_bounce_dx(ball_x: f32, paddle: &Rect, deflection: f32) -> f32 {
    let hit_offset = ((ball_x - paddle.x) / paddle.width).clamp(0.0, 1.0);
    (hit_offset - 0.5) * deflection
}
