use std::collections::HashSet;

use crate::game::scorer::ScoreRecorder;
use crate::models::Player;

/// Words already credited this round, per player
#[derive(Debug, Default)]
pub struct WordRegistry {
    human: HashSet<String>,
    computer: HashSet<String>,
}

impl WordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if either player already owns the word
    pub fn is_claimed(&self, word: &str) -> bool {
        self.human.contains(word) || self.computer.contains(word)
    }

    /// Credit `word` to `player` and report it to the recorder.
    ///
    /// Returns false, without recording anything, when the word was already
    /// credited to either player.
    pub fn credit(&mut self, word: &str, player: Player, recorder: &mut impl ScoreRecorder) -> bool {
        if self.is_claimed(word) {
            return false;
        }

        let set = match player {
            Player::Human => &mut self.human,
            Player::Computer => &mut self.computer,
        };
        set.insert(word.to_string());
        recorder.record(word, player);

        true
    }
}
