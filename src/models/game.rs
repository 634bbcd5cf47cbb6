use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if two positions are adjacent (including diagonals)
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let col_diff = self.col.abs_diff(other.col);

        row_diff.max(col_diff) == 1
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "You"),
            Player::Computer => write!(f, "Computer"),
        }
    }
}

/// Board sizes offered at the start of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSize {
    /// 16 cubes on a 4x4 board
    Standard,
    /// 25 cubes on a 5x5 board
    Big,
}

impl BoardSize {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(BoardSize::Standard),
            2 => Some(BoardSize::Big),
            _ => None,
        }
    }

    pub fn cube_count(self) -> usize {
        match self {
            BoardSize::Standard => 16,
            BoardSize::Big => 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeSetup {
    /// Player types in the letters of every cube
    Custom,
    /// Classic cube tables
    Default,
}

impl CubeSetup {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(CubeSetup::Custom),
            2 => Some(CubeSetup::Default),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Restart,
    Exit,
}

impl NextStep {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(NextStep::Restart),
            2 => Some(NextStep::Exit),
            _ => None,
        }
    }
}

/// A word credited to a player, with the points it earned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub points: u32,
    pub player: Player,
}

/// Snapshot of a finished round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub board: Vec<String>,
    pub min_word_length: usize,
    pub human_words: Vec<WordRecord>,
    pub computer_words: Vec<WordRecord>,
    pub human_score: u32,
    pub computer_score: u32,
}

impl RoundSummary {
    pub fn winner(&self) -> Option<Player> {
        use std::cmp::Ordering;

        match self.human_score.cmp(&self.computer_score) {
            Ordering::Greater => Some(Player::Human),
            Ordering::Less => Some(Player::Computer),
            Ordering::Equal => None,
        }
    }
}
