//! Character-grid renderer for headless terminals

use std::ops::Range;

use glam::Vec2;

use super::Renderer;
use crate::sim::Rect;

const EMPTY: char = ' ';
const BRICK: char = '#';
const PADDLE: char = '=';
const BALL: char = 'o';

/// Cells covered by `[start, end)`, at least one unless fully off-grid
fn cell_range(start: f32, end: f32, scale: f32, limit: usize) -> Range<usize> {
    let lo = ((start / scale).floor().max(0.0) as usize).min(limit);
    let hi = ((end / scale).ceil().max(0.0) as usize).max(lo + 1).min(limit);
    lo..hi
}

/// Rasterises each frame into `cols x rows` character cells
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    /// Board units per cell
    scale: Vec2,
    cells: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(board_width: f32, board_height: f32, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            scale: Vec2::new(board_width / cols as f32, board_height / rows as f32),
            cells: vec![EMPTY; cols * rows],
        }
    }

    fn fill(&mut self, rect: Rect, ch: char) {
        let xs = cell_range(rect.x, rect.right(), self.scale.x, self.cols);
        let ys = cell_range(rect.y, rect.bottom(), self.scale.y, self.rows);
        for y in ys {
            for x in xs.clone() {
                self.cells[y * self.cols + x] = ch;
            }
        }
    }

    fn write_centered(&mut self, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }
        let chars: Vec<char> = text.chars().take(self.cols).collect();
        let start = (self.cols - chars.len()) / 2;
        for (i, ch) in chars.into_iter().enumerate() {
            self.cells[row * self.cols + start + i] = ch;
        }
    }

    /// Current frame, one line per row
    pub fn render_to_string(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl Renderer for AsciiRenderer {
    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    fn draw_brick(&mut self, rect: Rect, _color: u32) {
        self.fill(rect, BRICK);
    }

    fn draw_paddle(&mut self, rect: Rect) {
        self.fill(rect, PADDLE);
    }

    fn draw_ball(&mut self, center: Vec2, _radius: f32) {
        let x = (center.x / self.scale.x).floor();
        let y = (center.y / self.scale.y).floor();
        if x >= 0.0 && y >= 0.0 && (x as usize) < self.cols && (y as usize) < self.rows {
            self.cells[y as usize * self.cols + x as usize] = BALL;
        }
    }

    fn draw_banner(&mut self, text: &str, subtext: &str) {
        let mid = self.rows / 2;
        self.write_centered(mid, text);
        self.write_centered(mid + 1, subtext);
    }
}
