//! Character-grid renderer for terminals and logs

use super::{Renderer, START_PROMPT, score_line};
use crate::consts::{COURT_HEIGHT, COURT_WIDTH};
use crate::sim::{GamePhase, Snapshot};

/// Rasterizes frames into a fixed-size grid of characters
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    show_center_line: bool,
    last: String,
    frames: u64,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(80, 20)
    }
}

impl TextRenderer {
    /// Grid of `cols` × `rows` cells inside the border
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(8),
            rows: rows.max(4),
            show_center_line: true,
            last: String::new(),
            frames: 0,
        }
    }

    pub fn with_center_line(mut self, show: bool) -> Self {
        self.show_center_line = show;
        self
    }

    /// Most recently drawn frame
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn cell(&self, x: f32, y: f32) -> (usize, usize) {
        let col = (x / COURT_WIDTH * self.cols as f32).floor();
        let row = (y / COURT_HEIGHT * self.rows as f32).floor();
        (
            (col.max(0.0) as usize).min(self.cols - 1),
            (row.max(0.0) as usize).min(self.rows - 1),
        )
    }

    /// Render a frame to a multi-line string
    pub fn render(&self, frame: &Snapshot) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        if self.show_center_line {
            let mid = self.cols / 2;
            for row in grid.iter_mut().step_by(2) {
                row[mid] = ':';
            }
        }

        for paddle in [frame.player, frame.ai] {
            let (col, top) = self.cell(paddle.x, paddle.y);
            let (_, bottom) = self.cell(paddle.x, paddle.y + paddle.height - 0.01);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[col] = '#';
            }
        }

        let (col, row) = self.cell(frame.ball.x, frame.ball.y);
        grid[row][col] = 'O';

        if frame.phase == GamePhase::NotStarted {
            let row = self.rows * 3 / 4;
            let start = self.cols.saturating_sub(START_PROMPT.len()) / 2;
            for (i, ch) in START_PROMPT.chars().take(self.cols).enumerate() {
                grid[row][start + i] = ch;
            }
        }

        let border = format!("+{}+", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 3));
        out.push_str(&score_line(frame));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &Snapshot) {
        self.last = self.render(frame);
        self.frames += 1;
    }
}
