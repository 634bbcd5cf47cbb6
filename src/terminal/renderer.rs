use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::models::Position;

/// Visual surface showing the cubes of the current board
pub trait BoardRenderer {
    /// Show `letter` on the cube at `pos`
    fn place_letter(&mut self, pos: Position, letter: char);

    /// Toggle emphasis of the cube at `pos`
    fn highlight(&mut self, pos: Position, on: bool);

    /// Show the board after all letters are placed
    fn present(&mut self) {}
}

/// Columns taken by one cube on screen
const CELL_WIDTH: usize = 3;

/// Board pinned to the top rows of the terminal.
///
/// `present` clears the screen and draws the board with the cursor left
/// underneath it. Highlight changes repaint the board in place and put the
/// cursor back where the prompts left it.
pub struct TerminalRenderer<W> {
    out: W,
    cells: Vec<Vec<char>>,
    lit: HashSet<Position>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: Vec::new(),
            lit: HashSet::new(),
        }
    }

    fn queue_cells(&mut self) -> io::Result<()> {
        for (row, letters) in self.cells.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for (col, letter) in letters.iter().enumerate() {
                let cube = format!(" {} ", letter);
                if self.lit.contains(&Position::new(row, col)) {
                    queue!(
                        self.out,
                        SetForegroundColor(Color::Yellow),
                        SetAttribute(Attribute::Reverse),
                        Print(cube),
                        SetAttribute(Attribute::Reset),
                        ResetColor
                    )?;
                } else {
                    queue!(self.out, Print(cube))?;
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        self.queue_cells()?;
        queue!(self.out, cursor::MoveTo(0, self.cells.len() as u16 + 1))?;
        self.out.flush()
    }

    fn repaint(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::SavePosition)?;
        self.queue_cells()?;
        queue!(self.out, cursor::RestorePosition)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> BoardRenderer for TerminalRenderer<W> {
    fn place_letter(&mut self, pos: Position, letter: char) {
        if pos.row == 0 && pos.col == 0 {
            // A new board starts at the top-left cube
            self.cells.clear();
            self.lit.clear();
        }
        if self.cells.len() <= pos.row {
            self.cells.resize(pos.row + 1, Vec::new());
        }
        let row = &mut self.cells[pos.row];
        if row.len() <= pos.col {
            row.resize(pos.col + 1, ' ');
        }
        row[pos.col] = letter;
    }

    fn highlight(&mut self, pos: Position, on: bool) {
        let changed = if on {
            self.lit.insert(pos)
        } else {
            self.lit.remove(&pos)
        };
        if changed {
            if let Err(e) = self.repaint() {
                tracing::warn!("Failed to highlight cube {:?}: {}", pos, e);
            }
        }
    }

    fn present(&mut self) {
        if let Err(e) = self.draw() {
            tracing::warn!("Failed to draw board: {}", e);
        }
    }
}
