use std::fmt;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::dictionary::Lexicon;
use crate::game::board::Board;
use crate::game::registry::WordRegistry;
use crate::game::scorer::{Scoreboard, Scorer};
use crate::game::tracer::{extract_word, is_valid_path, PathTracer, Pruning};
use crate::models::{Player, Position, RoundSummary};
use crate::terminal::{BoardRenderer, Console};

/// What happened to a word the human typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    TooShort { min: usize },
    NotAWord,
    AlreadyGuessed,
    NotOnBoard,
    Accepted { points: u32 },
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessOutcome::TooShort { min } => {
                write!(f, "Word must be at least {} characters long", min)
            }
            GuessOutcome::NotAWord => write!(f, "Not a valid English word"),
            GuessOutcome::AlreadyGuessed => write!(f, "You've already guessed that word"),
            GuessOutcome::NotOnBoard => write!(f, "Word cannot be formed from the board"),
            GuessOutcome::Accepted { points } => {
                write!(f, "Found it! Worth {} point(s)", points)
            }
        }
    }
}

/// One board and everything credited on it
pub struct Round<'d, L: Lexicon + ?Sized> {
    board: Board,
    lexicon: &'d L,
    registry: WordRegistry,
    scoreboard: Scoreboard,
    min_word_length: usize,
    highlight_delay: Duration,
}

impl<'d, L: Lexicon + ?Sized> Round<'d, L> {
    pub fn new(board: Board, lexicon: &'d L, min_word_length: usize, highlight_delay: Duration) -> Self {
        Self {
            board,
            lexicon,
            registry: WordRegistry::new(),
            scoreboard: Scoreboard::new(),
            min_word_length,
            highlight_delay,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Validate a human guess, cheapest checks first, and credit it when
    /// it can be traced on the board
    pub fn check_guess(&mut self, guess: &str, renderer: &mut dyn BoardRenderer) -> GuessOutcome {
        let word = guess.trim().to_lowercase();

        if word.chars().count() < self.min_word_length {
            return GuessOutcome::TooShort {
                min: self.min_word_length,
            };
        }
        if !self.lexicon.is_word(&word) {
            return GuessOutcome::NotAWord;
        }
        if self.registry.is_claimed(&word) {
            return GuessOutcome::AlreadyGuessed;
        }

        let Some(path) = PathTracer::new(&self.board).trace(&word) else {
            return GuessOutcome::NotOnBoard;
        };

        self.registry.credit(&word, Player::Human, &mut self.scoreboard);
        highlight_path(renderer, &path, self.highlight_delay);

        GuessOutcome::Accepted {
            points: Scorer::points(&word),
        }
    }

    /// Read guesses until the player enters an empty line
    pub fn human_turn<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        renderer: &mut dyn BoardRenderer,
    ) -> io::Result<()> {
        loop {
            let Some(guess) = console.read_line("Enter word : ")? else {
                return Ok(());
            };
            if guess.is_empty() {
                return Ok(());
            }

            let outcome = self.check_guess(&guess, renderer);
            tracing::debug!("Guess {:?}: {:?}", guess, outcome);
            console.say(&outcome)?;
        }
    }

    /// Search from every cube and credit each eligible word not yet
    /// claimed. Returns the new words in the order they were found.
    pub fn computer_turn(&mut self, renderer: &mut dyn BoardRenderer) -> Vec<String> {
        let board = &self.board;
        let registry = &mut self.registry;
        let scoreboard = &mut self.scoreboard;
        let min_word_length = self.min_word_length;
        let highlight_delay = self.highlight_delay;

        let mut tracer = PathTracer::new(board);
        let mut found = Vec::new();

        for start in board.positions() {
            tracer.explore_from(start, self.lexicon, Pruning::Enabled, &mut |word: &str, path: &[Position]| {
                if word.chars().count() < min_word_length {
                    return;
                }
                if registry.credit(word, Player::Computer, &mut *scoreboard) {
                    debug_assert!(is_valid_path(board, path));
                    debug_assert_eq!(extract_word(board, path), word);
                    tracing::debug!("Computer found {} from {:?}", word, start);
                    highlight_path(&mut *renderer, path, highlight_delay);
                    found.push(word.to_string());
                }
            });
        }

        tracing::info!("Computer found {} word(s)", found.len());
        found
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            board: self.board.display_rows(),
            min_word_length: self.min_word_length,
            human_words: self.scoreboard.words(Player::Human).cloned().collect(),
            computer_words: self.scoreboard.words(Player::Computer).cloned().collect(),
            human_score: self.scoreboard.total(Player::Human),
            computer_score: self.scoreboard.total(Player::Computer),
        }
    }
}

/// Put every cube of the board on the renderer
pub fn draw_board(renderer: &mut dyn BoardRenderer, board: &Board) {
    for pos in board.positions() {
        renderer.place_letter(pos, board.face(pos));
    }
    renderer.present();
}

/// Light up the path one cube at a time, then clear it
pub fn highlight_path(renderer: &mut dyn BoardRenderer, path: &[Position], delay: Duration) {
    for &pos in path {
        renderer.highlight(pos, true);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    for &pos in path {
        renderer.highlight(pos, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use std::collections::BTreeSet;
    use std::io::Cursor;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Place(Position, char),
        Highlight(Position, bool),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl BoardRenderer for Recorder {
        fn place_letter(&mut self, pos: Position, letter: char) {
            self.0.push(Call::Place(pos, letter));
        }

        fn highlight(&mut self, pos: Position, on: bool) {
            self.0.push(Call::Highlight(pos, on));
        }
    }

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["cat", "tar", "rat", "dog", "ore", "cog", "at"])
    }

    fn round(dict: &Dictionary, min_word_length: usize) -> Round<'_, Dictionary> {
        let board = Board::from_rows(&["CAT", "ORE", "DOG"]);
        Round::new(board, dict, min_word_length, Duration::ZERO)
    }

    #[test]
    fn test_guess_rejections_in_order() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut renderer = Recorder::default();

        assert_eq!(round.check_guess("at", &mut renderer), GuessOutcome::TooShort { min: 3 });
        assert_eq!(round.check_guess("xyz", &mut renderer), GuessOutcome::NotAWord);
        assert_eq!(round.check_guess("cog", &mut renderer), GuessOutcome::NotOnBoard);
        assert!(renderer.0.is_empty());
    }

    #[test]
    fn test_accepted_guess_is_highlighted_in_order() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut renderer = Recorder::default();

        assert_eq!(
            round.check_guess("  Dog ", &mut renderer),
            GuessOutcome::Accepted { points: 1 }
        );

        let path = [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)];
        let expected: Vec<Call> = path
            .iter()
            .map(|&pos| Call::Highlight(pos, true))
            .chain(path.iter().map(|&pos| Call::Highlight(pos, false)))
            .collect();
        assert_eq!(renderer.0, expected);

        assert_eq!(round.check_guess("DOG", &mut renderer), GuessOutcome::AlreadyGuessed);
    }

    #[test]
    fn test_short_words_never_accepted() {
        let dict = dictionary();
        let mut round = round(&dict, 4);
        let mut renderer = Recorder::default();

        for word in ["cat", "dog", "tar"] {
            assert_eq!(round.check_guess(word, &mut renderer), GuessOutcome::TooShort { min: 4 });
        }
        assert!(round.computer_turn(&mut renderer).is_empty());
        assert_eq!(round.summary().computer_score, 0);
    }

    #[test]
    fn test_human_turn_stops_at_empty_line() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut renderer = Recorder::default();
        let mut console = Console::new(Cursor::new(b"dog\ncog\ndog\n\ntar\n".to_vec()), Vec::new());

        round.human_turn(&mut console, &mut renderer).unwrap();

        let out = String::from_utf8(console.output().clone()).unwrap();
        assert!(out.contains("Found it! Worth 1 point(s)"));
        assert!(out.contains("Word cannot be formed from the board"));
        assert!(out.contains("You've already guessed that word"));

        let summary = round.summary();
        let human: Vec<&str> = summary.human_words.iter().map(|record| record.word.as_str()).collect();
        assert_eq!(human, vec!["dog"]);
    }

    #[test]
    fn test_whitespace_guess_does_not_end_turn() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut console = Console::new(Cursor::new(b"   \ndog\n\n".to_vec()), Vec::new());

        round.human_turn(&mut console, &mut Recorder::default()).unwrap();

        let out = String::from_utf8(console.output().clone()).unwrap();
        assert!(out.contains("Word must be at least 3 characters long"));
        assert_eq!(round.summary().human_score, 1);
    }

    #[test]
    fn test_human_turn_ends_at_end_of_input() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut console = Console::new(Cursor::new(b"cat".to_vec()), Vec::new());

        round.human_turn(&mut console, &mut Recorder::default()).unwrap();
        assert_eq!(round.summary().human_score, 1);
    }

    #[test]
    fn test_computer_skips_human_words() {
        let dict = dictionary();
        let mut round = round(&dict, 3);
        let mut renderer = Recorder::default();

        round.check_guess("dog", &mut renderer);
        let found: BTreeSet<String> = round.computer_turn(&mut renderer).into_iter().collect();

        let expected: BTreeSet<String> = ["cat", "ore", "rat", "tar"].iter().map(|w| w.to_string()).collect();
        assert_eq!(found, expected);

        let summary = round.summary();
        assert_eq!(summary.human_score, 1);
        assert_eq!(summary.computer_score, 4);
        assert_eq!(summary.winner(), Some(Player::Computer));
    }

    #[test]
    fn test_computer_credits_word_once() {
        let dict = Dictionary::from_words(["cat"]);
        let board = Board::from_rows(&["CATX", "ATCX", "XXXX", "CATX"]);
        let mut round = Round::new(board, &dict, 3, Duration::ZERO);
        let mut renderer = Recorder::default();

        let mut starts = 0;
        {
            let mut tracer = PathTracer::new(round.board());
            for pos in round.board().positions() {
                let mut hit = false;
                tracer.explore_from(pos, &dict, Pruning::Enabled, &mut |_: &str, _: &[Position]| hit = true);
                if hit {
                    starts += 1;
                }
            }
        }
        assert_eq!(starts, 3);

        assert_eq!(round.computer_turn(&mut renderer), vec!["cat"]);
        assert_eq!(round.summary().computer_words.len(), 1);

        // A second scan finds nothing new
        assert!(round.computer_turn(&mut renderer).is_empty());
    }

    #[test]
    fn test_draw_board_places_faces() {
        let board = Board::from_rows(&["Ab"]);
        let mut renderer = Recorder::default();
        draw_board(&mut renderer, &board);
        assert_eq!(
            renderer.0,
            vec![
                Call::Place(Position::new(0, 0), 'A'),
                Call::Place(Position::new(0, 1), 'b'),
            ]
        );
    }
}
