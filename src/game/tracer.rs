use std::collections::{BTreeSet, HashSet};

use crate::dictionary::Lexicon;
use crate::game::board::{Board, VisitedMask};
use crate::models::Position;

/// Whether open-ended exploration abandons branches no word starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    Enabled,
    /// Walk every path. Only used to check that pruning never loses a word.
    #[cfg(test)]
    Disabled,
}

/// Depth-first search over a board.
///
/// The tracer owns the visited mask and the current path for the duration
/// of a search. A cell is marked exactly while it sits on the path, so both
/// are restored to empty whenever a search returns.
pub struct PathTracer<'b> {
    board: &'b Board,
    visited: VisitedMask,
    path: Vec<Position>,
}

impl<'b> PathTracer<'b> {
    pub fn new(board: &'b Board) -> Self {
        Self {
            board,
            visited: VisitedMask::new(board),
            path: Vec::with_capacity(board.rows() * board.cols()),
        }
    }

    /// Find one path spelling `word`, trying start cells in row-major order.
    /// `word` is expected lowercase.
    pub fn trace(&mut self, word: &str) -> Option<Vec<Position>> {
        let letters: Vec<char> = word.chars().collect();
        let (&first, rest) = letters.split_first()?;
        self.reset();

        let board = self.board;
        for start in board.positions() {
            if board.at(start) != first {
                continue;
            }

            self.enter(start);
            if self.extend(start, rest) {
                let path = std::mem::take(&mut self.path);
                self.reset();
                return Some(path);
            }
            self.leave(start);
        }

        None
    }

    fn extend(&mut self, from: Position, rest: &[char]) -> bool {
        let Some((&next, tail)) = rest.split_first() else {
            return true;
        };

        let board = self.board;
        for pos in board.neighbors(from) {
            if self.visited.is_marked(pos) || board.at(pos) != next {
                continue;
            }

            self.enter(pos);
            if self.extend(pos, tail) {
                return true;
            }
            self.leave(pos);
        }

        false
    }

    /// Walk every path starting at `start`, calling `visit` with each
    /// dictionary word spelled along the way and the path that spells it.
    pub fn explore_from<L, F>(&mut self, start: Position, lexicon: &L, pruning: Pruning, visit: &mut F)
    where
        L: Lexicon + ?Sized,
        F: FnMut(&str, &[Position]),
    {
        self.reset();

        let mut so_far = String::new();
        so_far.push(self.board.at(start));
        self.enter(start);
        self.explore(start, &mut so_far, lexicon, pruning, visit);
        self.leave(start);
    }

    fn explore<L, F>(
        &mut self,
        at: Position,
        so_far: &mut String,
        lexicon: &L,
        pruning: Pruning,
        visit: &mut F,
    ) where
        L: Lexicon + ?Sized,
        F: FnMut(&str, &[Position]),
    {
        if pruning == Pruning::Enabled && !lexicon.is_prefix(so_far) {
            return;
        }
        if lexicon.is_word(so_far) {
            visit(so_far, &self.path);
        }

        let board = self.board;
        for next in board.neighbors(at) {
            if self.visited.is_marked(next) {
                continue;
            }

            self.enter(next);
            so_far.push(board.at(next));
            self.explore(next, so_far, lexicon, pruning, visit);
            so_far.pop();
            self.leave(next);
        }
    }

    fn enter(&mut self, pos: Position) {
        self.visited.mark(pos);
        self.path.push(pos);
        debug_assert_eq!(self.visited.count(), self.path.len());
    }

    fn leave(&mut self, pos: Position) {
        debug_assert_eq!(self.path.last(), Some(&pos));
        self.path.pop();
        self.visited.unmark(pos);
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.path.clear();
    }
}

/// Every dictionary word that can be traced somewhere on the board
pub fn enumerate_words<L: Lexicon + ?Sized>(board: &Board, lexicon: &L, pruning: Pruning) -> BTreeSet<String> {
    let mut tracer = PathTracer::new(board);
    let mut found = BTreeSet::new();

    for start in board.positions() {
        tracer.explore_from(start, lexicon, pruning, &mut |word: &str, _: &[Position]| {
            found.insert(word.to_string());
        });
    }

    found
}

/// Validate that positions form a legal path on the board
pub fn is_valid_path(board: &Board, positions: &[Position]) -> bool {
    if positions.is_empty() {
        return false;
    }

    // Check that all positions are within bounds
    if !positions
        .iter()
        .all(|pos| pos.row < board.rows() && pos.col < board.cols())
    {
        return false;
    }

    // Check that each position is adjacent to the previous one
    if !positions.windows(2).all(|pair| pair[0].is_adjacent(&pair[1])) {
        return false;
    }

    // Check that no position is used twice
    let unique_positions: HashSet<_> = positions.iter().collect();
    unique_positions.len() == positions.len()
}

/// Extract word from board positions
pub fn extract_word(board: &Board, positions: &[Position]) -> String {
    positions.iter().map(|&pos| board.at(pos)).collect()
}
