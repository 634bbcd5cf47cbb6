use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::models::Position;

/// Offsets of the eight cells surrounding a cell, in scan order
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("{0} cubes cannot fill a square board")]
    NotSquare(usize),

    #[error("cube {0} has no letters")]
    EmptyCube(usize),
}

/// Letters for one round, stored row-major
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Lowercased letters used for matching
    letters: Vec<char>,
    /// Faces as they were rolled, for display
    faces: Vec<char>,
}

impl Board {
    /// Shuffle the cubes, then roll each one into the grid in row-major order
    pub fn from_cubes<S: AsRef<str>>(cubes: &[S], rng: &mut impl Rng) -> Result<Self, BoardError> {
        let side = square_side(cubes.len()).ok_or(BoardError::NotSquare(cubes.len()))?;

        let mut cubes: Vec<&str> = cubes.iter().map(AsRef::as_ref).collect();
        if let Some(index) = cubes.iter().position(|cube| cube.is_empty()) {
            return Err(BoardError::EmptyCube(index + 1));
        }
        cubes.shuffle(rng);

        let faces = cubes
            .iter()
            .map(|cube| {
                let faces: Vec<char> = cube.chars().collect();
                faces[rng.random_range(0..faces.len())]
            })
            .collect();

        Ok(Self::from_faces(side, side, faces))
    }

    /// Build a board from rows of letters, e.g. `["ab", "cd"]`
    #[cfg(test)]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let grid: Vec<Vec<char>> = rows.iter().map(|row| row.as_ref().chars().collect()).collect();
        let cols = grid.first().map_or(0, Vec::len);
        assert!(
            cols > 0 && grid.iter().all(|row| row.len() == cols),
            "board rows must be non-empty and of equal length"
        );

        Self::from_faces(grid.len(), cols, grid.into_iter().flatten().collect())
    }

    fn from_faces(rows: usize, cols: usize, faces: Vec<char>) -> Self {
        let letters = faces.iter().map(char::to_ascii_lowercase).collect();
        Self {
            rows,
            cols,
            letters,
            faces,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Lowercased letter at a position
    pub fn at(&self, pos: Position) -> char {
        self.letters[self.index(pos)]
    }

    /// Letter as rolled, for display
    pub fn face(&self, pos: Position) -> char {
        self.faces[self.index(pos)]
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// In-bounds cells surrounding `pos`
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = pos.row as isize + dr;
            let col = pos.col as isize + dc;
            self.in_bounds(row, col)
                .then(|| Position::new(row as usize, col as usize))
        })
    }

    /// Board rows as displayed, top to bottom
    pub fn display_rows(&self) -> Vec<String> {
        self.faces
            .chunks(self.cols)
            .map(|row| row.iter().collect())
            .collect()
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.rows && pos.col < self.cols);
        pos.row * self.cols + pos.col
    }
}

/// Side length of a square board holding `count` cells
fn square_side(count: usize) -> Option<usize> {
    (1..=count).take_while(|side| side * side <= count).find(|side| side * side == count)
}

/// Cells on the current search path, shaped like the board
#[derive(Debug, Clone)]
pub struct VisitedMask {
    cols: usize,
    cells: Vec<bool>,
}

impl VisitedMask {
    pub fn new(board: &Board) -> Self {
        Self {
            cols: board.cols(),
            cells: vec![false; board.rows() * board.cols()],
        }
    }

    pub fn mark(&mut self, pos: Position) {
        let index = self.index(pos);
        self.cells[index] = true;
    }

    pub fn unmark(&mut self, pos: Position) {
        let index = self.index(pos);
        self.cells[index] = false;
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.cells[self.index(pos)]
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&marked| marked).count()
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }
}
