use crate::models::{Player, WordRecord};

/// Word length worth a single point
pub const BASELINE_LENGTH: usize = 4;

/// Receives every word credited during a round
pub trait ScoreRecorder {
    fn record(&mut self, word: &str, player: Player);
}

pub struct Scorer;

impl Scorer {
    /// Calculate the points for a word.
    ///
    /// Scoring rules:
    /// - A word of `BASELINE_LENGTH` letters is worth 1 point
    /// - Each letter beyond that adds 1 point
    /// - Shorter words, allowed when the minimum length is lowered, still earn 1
    pub fn points(word: &str) -> u32 {
        let length = word.chars().count();
        let extra = length.saturating_sub(BASELINE_LENGTH) as u32;
        1 + extra
    }
}

/// Words and totals for both players in the current round
#[derive(Debug, Default)]
pub struct Scoreboard {
    records: Vec<WordRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self, player: Player) -> impl Iterator<Item = &WordRecord> {
        self.records.iter().filter(move |record| record.player == player)
    }

    pub fn total(&self, player: Player) -> u32 {
        self.words(player).map(|record| record.points).sum()
    }
}

impl ScoreRecorder for Scoreboard {
    fn record(&mut self, word: &str, player: Player) {
        let points = Scorer::points(word);
        tracing::debug!("{} scored {} for {} point(s)", player, word, points);

        self.records.push(WordRecord {
            word: word.to_string(),
            points,
            player,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_by_length() {
        assert_eq!(Scorer::points("tree"), 1);
        assert_eq!(Scorer::points("trees"), 2);
        assert_eq!(Scorer::points("streets"), 4);
        assert_eq!(Scorer::points("sesquipedalian"), 11);
    }

    #[test]
    fn test_short_words_score_one() {
        assert_eq!(Scorer::points("a"), 1);
        assert_eq!(Scorer::points("at"), 1);
        assert_eq!(Scorer::points("ate"), 1);
    }

    #[test]
    fn test_scoreboard_totals() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.record("tree", Player::Human);
        scoreboard.record("trees", Player::Human);
        scoreboard.record("street", Player::Computer);

        assert_eq!(scoreboard.total(Player::Human), 3);
        assert_eq!(scoreboard.total(Player::Computer), 3);

        let human: Vec<&str> = scoreboard
            .words(Player::Human)
            .map(|record| record.word.as_str())
            .collect();
        assert_eq!(human, vec!["tree", "trees"]);
    }

    #[test]
    fn test_empty_scoreboard() {
        let scoreboard = Scoreboard::new();
        assert_eq!(scoreboard.total(Player::Human), 0);
        assert_eq!(scoreboard.words(Player::Computer).count(), 0);
    }
}
