use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;

use crate::dictionary::Lexicon;
use crate::game::round::draw_board;
use crate::game::tracer::{enumerate_words, Pruning};
use crate::game::{Board, Round};
use crate::models::{BoardSize, CubeSetup, NextStep, Player, RoundSummary};
use crate::settings::Settings;
use crate::terminal::{BoardRenderer, Console};
use crate::utils::cubes::{default_cubes, ordinal_suffix, parse_cube};

const WELCOME: &str = "Welcome! You're about to play a game of Boggle against a \
dictionary-toting computer. You might pick up some new vocabulary along the way, \
but don't expect to win.";

const INSTRUCTIONS: &str = "The board is a grid of lettered cubes. You go first: \
type every word you can trace by moving between neighbouring cubes, horizontally, \
vertically or diagonally. Each cube may be used once per word, words must meet the \
minimum length, and each word only counts once. A word of four letters scores one \
point and every extra letter adds another. Enter an empty line when you run out of \
ideas, and the computer will take every word you missed.";

/// Menu-driven sequence of rounds sharing one dictionary
pub struct Session<'a, L: Lexicon + ?Sized> {
    settings: &'a Settings,
    lexicon: &'a L,
}

impl<'a, L: Lexicon + ?Sized> Session<'a, L> {
    pub fn new(settings: &'a Settings, lexicon: &'a L) -> Self {
        Self { settings, lexicon }
    }

    /// Play rounds until the player exits or input runs out
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        renderer: &mut dyn BoardRenderer,
        rng: &mut impl Rng,
    ) -> Result<()> {
        self.welcome(console)?;

        while let Some(summary) = self.play_round(console, renderer, rng)? {
            tracing::info!("Round summary: {}", serde_json::to_string(&summary)?);

            let next = choose(console, "", "1)Restart Game  2)Exit ", "Enter 1 or 2", NextStep::from_choice)?;
            if next != Some(NextStep::Restart) {
                break;
            }
            console.say("Starting a new game")?;
        }

        console.say("Exited Game")?;
        Ok(())
    }

    fn welcome<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        console.say(WELCOME)?;
        console.say("")?;

        if self.settings.show_instructions {
            console.say(INSTRUCTIONS)?;
            console.say("")?;
            console.read_line("Hit return when you're ready...")?;
        }

        Ok(())
    }

    /// Configure and play one round. Returns `None` if input ran out
    /// before the board was set up.
    fn play_round<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        renderer: &mut dyn BoardRenderer,
        rng: &mut impl Rng,
    ) -> Result<Option<RoundSummary>> {
        let Some(size) = choose(
            console,
            "Choose size of a board",
            "1)standard  2)big : ",
            "Choose 1 or 2",
            BoardSize::from_choice,
        )?
        else {
            return Ok(None);
        };

        let Some(setup) = choose(
            console,
            "Choose board set-up",
            "1)Custom  2)Default : ",
            "Choose 1 or 2",
            CubeSetup::from_choice,
        )?
        else {
            return Ok(None);
        };

        let cubes = match setup {
            CubeSetup::Default => default_cubes(size),
            CubeSetup::Custom => match read_custom_cubes(console, size.cube_count())? {
                Some(cubes) => cubes,
                None => return Ok(None),
            },
        };

        let Some(min_word_length) = read_min_word_length(console)? else {
            return Ok(None);
        };

        let board = Board::from_cubes(&cubes, rng).context("failed to build board")?;
        let mut round = Round::new(board, self.lexicon, min_word_length, self.settings.highlight_delay());

        // Counting the board's words costs a full search, so only do it when logged
        if tracing::enabled!(tracing::Level::INFO) {
            let available = enumerate_words(round.board(), self.lexicon, Pruning::Enabled)
                .iter()
                .filter(|word| word.chars().count() >= min_word_length)
                .count();
            tracing::info!(
                "New {}x{} board {:?} holds {} word(s) of length {} or more",
                round.board().rows(),
                round.board().cols(),
                round.board().display_rows(),
                available,
                min_word_length
            );
        }
        draw_board(renderer, round.board());

        round.human_turn(console, renderer)?;

        console.say("My turn!")?;
        for word in round.computer_turn(renderer) {
            console.say(format!("I found: {}", word))?;
        }

        let summary = round.summary();
        report_scores(console, &summary)?;

        Ok(Some(summary))
    }
}

/// Prompt for a numbered menu choice until `parse` accepts it
fn choose<T, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    prompt: &str,
    retry: &str,
    parse: impl Fn(i64) -> Option<T>,
) -> io::Result<Option<T>> {
    loop {
        if !title.is_empty() {
            console.say(title)?;
        }
        let Some(choice) = console.read_integer(prompt)? else {
            return Ok(None);
        };
        if let Some(value) = parse(choice) {
            return Ok(Some(value));
        }
        console.say(retry)?;
    }
}

fn read_custom_cubes<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    count: usize,
) -> io::Result<Option<Vec<String>>> {
    let mut cubes = Vec::with_capacity(count);

    for n in 1..=count {
        let prompt = format!("Enter {}{} Configuration: ", n, ordinal_suffix(n));
        loop {
            let Some(line) = console.read_line(&prompt)? else {
                return Ok(None);
            };
            match parse_cube(&line) {
                Some(cube) => {
                    cubes.push(cube);
                    break;
                }
                None => console.say("A cube needs one or more letters and nothing else")?,
            }
        }
    }

    Ok(Some(cubes))
}

fn read_min_word_length<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Option<usize>> {
    loop {
        let Some(n) = console.read_integer("Enter minimum length of word : ")? else {
            return Ok(None);
        };
        if n > 0 {
            return Ok(Some(n as usize));
        }
        console.say("Minimum length must be positive")?;
    }
}

fn report_scores<R: BufRead, W: Write>(console: &mut Console<R, W>, summary: &RoundSummary) -> io::Result<()> {
    console.say(format!(
        "Your score: {} ({} word(s))",
        summary.human_score,
        summary.human_words.len()
    ))?;
    console.say(format!(
        "Computer score: {} ({} word(s))",
        summary.computer_score,
        summary.computer_words.len()
    ))?;

    match summary.winner() {
        Some(Player::Human) => console.say("You win this round!"),
        Some(Player::Computer) => console.say("The computer wins this round!"),
        None => console.say("It's a tie!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::models::Position;
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::Cell;
    use std::io::Cursor;

    /// Dictionary that counts prefix lookups
    struct CountingLexicon {
        inner: Dictionary,
        prefix_lookups: Cell<usize>,
    }

    impl Lexicon for CountingLexicon {
        fn is_word(&self, word: &str) -> bool {
            self.inner.is_word(word)
        }

        fn is_prefix(&self, prefix: &str) -> bool {
            self.prefix_lookups.set(self.prefix_lookups.get() + 1);
            self.inner.is_prefix(prefix)
        }
    }

    struct NoRenderer;

    impl BoardRenderer for NoRenderer {
        fn place_letter(&mut self, _pos: Position, _letter: char) {}
        fn highlight(&mut self, _pos: Position, _on: bool) {}
    }

    fn settings(show_instructions: bool) -> Settings {
        Settings {
            dictionary_path: "EnglishWords.dat".to_string(),
            highlight_delay_ms: 0,
            show_instructions,
        }
    }

    fn play(settings: &Settings, dict: &Dictionary, input: impl AsRef<[u8]>) -> String {
        let mut console = Console::new(Cursor::new(input.as_ref().to_vec()), Vec::new());
        let mut rng = StdRng::seed_from_u64(42);

        Session::new(settings, dict)
            .run(&mut console, &mut NoRenderer, &mut rng)
            .unwrap();

        String::from_utf8(console.output().clone()).unwrap()
    }

    #[test]
    fn test_custom_board_round() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["aaa", "aaaa", "b"]);
        let cubes = "a\n".repeat(16);
        let input = format!("1\n1\n{}3\naaa\naaa\nb\n\n2\n", cubes);

        let out = play(&settings, &dict, &input);

        assert!(out.contains("Enter 1st Configuration: "));
        assert!(out.contains("Enter 16th Configuration: "));
        assert!(out.contains("Found it! Worth 1 point(s)"));
        assert!(out.contains("You've already guessed that word"));
        assert!(out.contains("Word must be at least 3 characters long"));
        assert!(out.contains("I found: aaaa"));
        assert!(out.contains("Your score: 1 (1 word(s))"));
        assert!(out.contains("Computer score: 1 (1 word(s))"));
        assert!(out.contains("It's a tie!"));
        assert!(out.ends_with("Exited Game\n"));
    }

    #[test]
    fn test_invalid_choices_are_reprompted() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["zzzz"]);
        let input = "9\nbig\n2\n0\n2\n-1\n0\n4\n\n5\n2\n";

        let out = play(&settings, &dict, input);

        assert_eq!(out.matches("Choose 1 or 2").count(), 2);
        assert!(out.contains("Illegal integer format. Try again."));
        assert_eq!(out.matches("Minimum length must be positive").count(), 2);
        assert!(out.contains("Enter 1 or 2"));
        assert!(out.contains("Exited Game"));
    }

    #[test]
    fn test_invalid_custom_cube_is_reprompted() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["zzzz"]);
        let mut input = String::from("1\n1\n\nab1\n");
        input.push_str(&"q\n".repeat(16));
        input.push_str("4\n\n2\n");

        let out = play(&settings, &dict, &input);

        assert_eq!(out.matches("A cube needs one or more letters and nothing else").count(), 2);
        assert_eq!(out.matches("Enter 1st Configuration: ").count(), 3);
        assert!(out.contains("Exited Game"));
    }

    #[test]
    fn test_restart_plays_another_round() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["zzzz"]);
        let input = "1\n2\n4\n\n1\n2\n2\n3\n\n2\n";

        let out = play(&settings, &dict, input);

        assert_eq!(out.matches("Starting a new game").count(), 1);
        assert_eq!(out.matches("Choose size of a board").count(), 2);
        assert!(out.contains("Exited Game"));
    }

    #[test]
    fn test_instructions_then_end_of_input() {
        let settings = settings(true);
        let dict = Dictionary::from_words(["zzzz"]);

        let out = play(&settings, &dict, "");

        assert!(out.starts_with("Welcome!"));
        assert!(out.contains("Hit return when you're ready..."));
        assert!(out.ends_with("Exited Game\n"));
    }

    #[test]
    fn test_invalid_utf8_guess_is_rejected_not_fatal() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["zzzz"]);

        let out = play(&settings, &dict, b"1\n2\n4\n\xff\xfe\n\n2\n");

        assert!(out.contains("Word must be at least 4 characters long"));
        assert!(out.contains("My turn!"));
        assert!(out.ends_with("Exited Game\n"));
    }

    #[test]
    fn test_invalid_utf8_menu_choice_is_reprompted() {
        let settings = settings(false);
        let dict = Dictionary::from_words(["zzzz"]);

        let out = play(&settings, &dict, b"\xc3\n1\n2\n4\n\n2\n");

        assert!(out.contains("Illegal integer format. Try again."));
        assert_eq!(out.matches("Choose size of a board").count(), 2);
        assert!(out.ends_with("Exited Game\n"));
    }

    #[test]
    fn test_round_searches_board_once_when_not_logging() {
        let settings = settings(false);
        let lexicon = CountingLexicon {
            inner: Dictionary::from_words(["tone", "note", "stone", "rate", "tear"]),
            prefix_lookups: Cell::new(0),
        };
        let mut console = Console::new(Cursor::new(b"1\n2\n3\n\n2\n".to_vec()), Vec::new());

        Session::new(&settings, &lexicon)
            .run(&mut console, &mut NoRenderer, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let session_lookups = lexicon.prefix_lookups.replace(0);

        // Same seed, same board: one full search is the computer's turn
        let board = Board::from_cubes(&default_cubes(BoardSize::Standard), &mut StdRng::seed_from_u64(42)).unwrap();
        enumerate_words(&board, &lexicon, Pruning::Enabled);

        assert!(session_lookups > 0);
        assert_eq!(session_lookups, lexicon.prefix_lookups.get());
    }
}
