use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;
use anyhow::{Context, Result};

/// Word lookups needed by the board search
pub trait Lexicon {
    /// Exact membership
    fn is_word(&self, word: &str) -> bool;

    /// True if at least one word starts with `prefix`, including the word
    /// itself. The empty prefix is always valid.
    fn is_prefix(&self, prefix: &str) -> bool;
}

pub struct Dictionary {
    words: BTreeSet<String>,
}

impl Dictionary {
    /// Load dictionary from a word-per-line file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;
        let dictionary = Self::from_words(content.lines());

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    /// Build a dictionary from in-memory words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        Self { words }
    }

    /// Create an empty dictionary (for testing)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for Dictionary {
    fn is_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn is_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }

        // The first word at or after the prefix in sorted order is the only
        // candidate that can start with it.
        let prefix = prefix.to_lowercase();
        self.words
            .range(prefix.clone()..)
            .next()
            .is_some_and(|word| word.starts_with(&prefix))
    }
}
