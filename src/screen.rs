//! Double-buffered screen rendering system
//! Minimizes flicker by only updating changed cells

use crate::terminal::{Color, Terminal};
use crate::ui::layout::Rect;
use std::io;

/// A single cell on the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::LightGray,
            bg: Color::Black,
        }
    }
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }
}

/// Double-buffered screen
///
/// Coordinates are 1-based, matching ANSI cursor addressing.
pub struct Screen {
    width: u16,
    height: u16,
    front: Vec<Cell>, // Currently displayed
    back: Vec<Cell>,  // Being drawn to
    /// Nested clip rectangles; writes outside the innermost one are dropped
    clips: Vec<Rect>,
    cursor: Option<(u16, u16)>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            front: vec![Cell::new('\0', Color::Black, Color::Black); size], // Force initial draw
            back: vec![Cell::default(); size],
            clips: Vec::new(),
            cursor: None,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= 1 && row <= self.height && col >= 1 && col <= self.width {
            Some(((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize))
        } else {
            None
        }
    }

    fn clipped(&self, row: u16, col: u16) -> bool {
        self.clips.last().is_some_and(|clip| !clip.contains(row, col))
    }

    /// Restrict drawing to `bounds` (intersected with the current clip)
    pub fn push_clip(&mut self, bounds: Rect) {
        let clip = match self.clips.last() {
            Some(outer) => outer.intersect(bounds),
            None => bounds,
        };
        self.clips.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clips.pop();
    }

    /// Set a cell in the back buffer
    pub fn set(&mut self, row: u16, col: u16, ch: char, fg: Color, bg: Color) {
        if self.clipped(row, col) {
            return;
        }
        if let Some(idx) = self.index(row, col) {
            self.back[idx] = Cell::new(ch, fg, bg);
        }
    }

    /// Get a cell from the back buffer
    pub fn get(&self, row: u16, col: u16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.back[idx])
    }

    /// Read `len` characters of a row from the back buffer
    pub fn row_text(&self, row: u16, col: u16, len: u16) -> String {
        (col..col.saturating_add(len))
            .filter_map(|c| self.get(row, c).map(|cell| cell.ch))
            .collect()
    }

    /// Write a string to the back buffer starting at given position
    pub fn write_str(&mut self, row: u16, col: u16, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let c = col.saturating_add(i as u16);
            if c > self.width {
                break;
            }
            self.set(row, c, ch, fg, bg);
        }
    }

    /// Fill a rectangle with a character
    pub fn fill(&mut self, bounds: Rect, ch: char, fg: Color, bg: Color) {
        for r in bounds.y..bounds.y.saturating_add(bounds.height) {
            for c in bounds.x..bounds.x.saturating_add(bounds.width) {
                self.set(r, c, ch, fg, bg);
            }
        }
    }

    /// Clear with specific colors
    pub fn clear_with(&mut self, fg: Color, bg: Color) {
        self.back.fill(Cell::new(' ', fg, bg));
    }

    /// Draw a single-line box
    pub fn draw_box(&mut self, bounds: Rect, fg: Color, bg: Color) {
        let Rect { x: col, y: row, width, height } = bounds;
        if width < 2 || height < 2 {
            return;
        }

        self.set(row, col, '┌', fg, bg);
        self.set(row, col + width - 1, '┐', fg, bg);
        self.set(row + height - 1, col, '└', fg, bg);
        self.set(row + height - 1, col + width - 1, '┘', fg, bg);

        for c in 1..width - 1 {
            self.set(row, col + c, '─', fg, bg);
            self.set(row + height - 1, col + c, '─', fg, bg);
        }
        for r in 1..height - 1 {
            self.set(row + r, col, '│', fg, bg);
            self.set(row + r, col + width - 1, '│', fg, bg);
        }
    }

    /// Draw a shadow effect (DOS style - dark area to right and below)
    pub fn draw_shadow(&mut self, bounds: Rect) {
        let Rect { x: col, y: row, width, height } = bounds;
        // Right shadow, 2 chars wide
        for r in 1..=height {
            for c in 0..2 {
                if let Some(idx) = self.index(row + r, col + width + c) {
                    let cell = &mut self.back[idx];
                    cell.fg = Color::DarkGray;
                    cell.bg = Color::Black;
                }
            }
        }
        // Bottom shadow
        for c in 2..width + 2 {
            if let Some(idx) = self.index(row + height, col + c) {
                let cell = &mut self.back[idx];
                cell.fg = Color::DarkGray;
                cell.bg = Color::Black;
            }
        }
    }

    /// Show the hardware cursor at a position, or hide it
    pub fn set_cursor(&mut self, cursor: Option<(u16, u16)>) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Flush changes to the terminal (only updates changed cells)
    pub fn flush(&mut self, term: &mut Terminal) -> io::Result<()> {
        let mut last: Option<(Color, Color)> = None;
        let mut next_pos: Option<(u16, u16)> = None;

        for row in 1..=self.height {
            for col in 1..=self.width {
                let Some(idx) = self.index(row, col) else { continue };
                let back = self.back[idx];
                if self.front[idx] == back {
                    continue;
                }

                if next_pos != Some((row, col)) {
                    term.goto(row, col)?;
                }
                if last != Some((back.fg, back.bg)) {
                    term.set_colors(back.fg, back.bg)?;
                    last = Some((back.fg, back.bg));
                }
                term.write_char(back.ch)?;
                self.front[idx] = back;
                next_pos = Some((row, col + 1));
            }
        }

        match self.cursor {
            Some((row, col)) => {
                term.goto(row, col)?;
                term.show_cursor()?;
            }
            None => term.hide_cursor()?,
        }

        term.flush()
    }

    /// Force full redraw on next flush
    pub fn invalidate(&mut self) {
        for cell in &mut self.front {
            cell.ch = '\0';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_drops_writes_outside() {
        let mut screen = Screen::new(20, 5);
        screen.push_clip(Rect::new(3, 2, 4, 1));
        screen.write_str(2, 1, "abcdefgh", Color::White, Color::Black);
        screen.pop_clip();

        assert_eq!(screen.row_text(2, 1, 8), "  cdef  ");
    }

    #[test]
    fn test_nested_clip_intersects() {
        let mut screen = Screen::new(20, 5);
        screen.push_clip(Rect::new(1, 1, 5, 5));
        screen.push_clip(Rect::new(4, 1, 10, 5));
        screen.write_str(1, 1, "abcdefgh", Color::White, Color::Black);
        screen.pop_clip();
        screen.pop_clip();

        assert_eq!(screen.row_text(1, 1, 8), "   de   ");
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut screen = Screen::new(4, 2);
        screen.set(0, 0, 'x', Color::White, Color::Black);
        screen.set(3, 1, 'x', Color::White, Color::Black);
        assert_eq!(screen.row_text(1, 1, 4), "    ");
    }
}
