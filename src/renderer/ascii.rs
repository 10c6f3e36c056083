//! Character-grid renderer for terminals and snapshots

use std::fmt;

use glam::Vec2;

use super::Renderer;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

const INK: char = '#';
const BLANK: char = ' ';

/// Screen rasterized onto a `cols` x `rows` character grid
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    /// Cell under a screen point (may be off-grid)
    fn cell(&self, p: Vec2) -> (i64, i64) {
        let x = (p.x / SCREEN_WIDTH * self.cols as f32).floor() as i64;
        let y = (p.y / SCREEN_HEIGHT * self.rows as f32).floor() as i64;
        (x, y)
    }

    fn plot(&mut self, x: i64, y: i64, ch: char) {
        if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.rows as i64 {
            return;
        }
        self.cells[y as usize * self.cols + x as usize] = ch;
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// Bresenham between two cells
    fn line(&mut self, from: (i64, i64), to: (i64, i64)) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, INK);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn write(&mut self, col: i64, row: i64, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.plot(col + i as i64, row, ch);
        }
    }
}

impl Renderer for AsciiCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_polyline(&mut self, points: &[Vec2], closed: bool) {
        let cells: Vec<_> = points.iter().map(|p| self.cell(*p)).collect();
        match cells.as_slice() {
            [] => {}
            [only] => self.plot(only.0, only.1, INK),
            _ => {
                for pair in cells.windows(2) {
                    self.line(pair[0], pair[1]);
                }
                if closed {
                    if let (Some(&first), Some(&last)) = (cells.first(), cells.last()) {
                        self.line(last, first);
                    }
                }
            }
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        let cell_width = SCREEN_WIDTH / self.cols as f32;
        if radius < cell_width {
            let (x, y) = self.cell(center);
            self.plot(x, y, '.');
            return;
        }
        let segments = 24;
        let ring: Vec<Vec2> = (0..segments)
            .map(|i| center + crate::heading(i as f32 * std::f32::consts::TAU / segments as f32) * radius)
            .collect();
        self.draw_polyline(&ring, true);
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, _scale: f32) {
        let (col, row) = self.cell(pos);
        self.write(col, row, text);
    }

    fn draw_centered_text(&mut self, y: f32, text: &str, _scale: f32) {
        let (_, row) = self.cell(Vec2::new(0.0, y));
        let len = text.chars().count() as i64;
        let col = (self.cols as i64 - len) / 2;
        self.write(col, row, text);
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
