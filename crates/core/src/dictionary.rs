//! Dictionary module for word validation and letter supply
//!
//! Provides O(1) hash set lookup with case-insensitive matching, plus weighted
//! random letters from the loaded character set.

use std::collections::HashSet;

use rand::RngCore;

use crate::alphabet::WeightedAlphabet;
use crate::error::{CoreError, CoreResult};
use crate::provider::DictionaryProvider;

/// Membership and letter queries the grid search and the engine rely on.
pub trait WordLookup {
    /// Case-insensitive membership. `Ok(false)` for the empty string,
    /// `Err(DictionaryNotLoaded)` when no word list is loaded.
    fn contains(&self, word: &str) -> CoreResult<bool>;

    /// A frequency-weighted random letter.
    fn random_letter(&self, rng: &mut dyn RngCore) -> CoreResult<char>;
}

impl<T: WordLookup + ?Sized> WordLookup for &T {
    fn contains(&self, word: &str) -> CoreResult<bool> {
        (**self).contains(word)
    }

    fn random_letter(&self, rng: &mut dyn RngCore) -> CoreResult<char> {
        (**self).random_letter(rng)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    language: Option<String>,
    /// `None` until a word list is set; an empty list still counts as loaded
    words: Option<HashSet<String>>,
    alphabet: Option<WeightedAlphabet>,
}

impl Dictionary {
    /// An unloaded dictionary; every query fails until words are set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new();
        dictionary.set_words(words);
        dictionary
    }

    pub fn with_alphabet(mut self, alphabet: WeightedAlphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Load both the word list and the character set for `language`
    pub async fn load<P>(provider: &P, language: &str) -> CoreResult<Self>
    where
        P: DictionaryProvider,
    {
        let words = provider.load_words(language).await?;
        let alphabet = provider.load_weighted_alphabet(language).await?;
        log::info!(
            "Loaded {language} dictionary: {} words, {} weighted letters",
            words.len(),
            alphabet.population_len()
        );

        Ok(Self {
            language: Some(language.to_string()),
            words: Some(words),
            alphabet: Some(alphabet),
        })
    }

    pub fn set_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words = Some(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        );
    }

    pub fn set_alphabet(&mut self, alphabet: WeightedAlphabet) {
        self.alphabet = Some(alphabet);
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.words.is_some()
    }

    pub fn has_alphabet(&self) -> bool {
        self.alphabet.is_some()
    }

    pub fn alphabet(&self) -> Option<&WeightedAlphabet> {
        self.alphabet.as_ref()
    }

    /// Returns the total number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordLookup for Dictionary {
    fn contains(&self, word: &str) -> CoreResult<bool> {
        let Some(words) = &self.words else {
            return Err(CoreError::DictionaryNotLoaded);
        };
        if word.is_empty() {
            return Ok(false);
        }
        if word.chars().any(|c| c.is_uppercase()) {
            Ok(words.contains(word.to_lowercase().as_str()))
        } else {
            Ok(words.contains(word))
        }
    }

    fn random_letter(&self, rng: &mut dyn RngCore) -> CoreResult<char> {
        self.alphabet
            .as_ref()
            .map(|a| a.sample(rng))
            .ok_or(CoreError::CharacterSetNotLoaded)
    }
}

/// Parse a newline-delimited word list. Lines are trimmed and lowercased;
/// blank lines are skipped.
pub fn parse_word_list(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase)
        .collect()
}
