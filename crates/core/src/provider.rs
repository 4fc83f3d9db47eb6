//! Dictionary providers - where word lists and character sets come from
//!
//! Loading is the only suspending operation in the game; it must finish before
//! the first board is generated.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::alphabet::WeightedAlphabet;
use crate::dictionary::parse_word_list;
use crate::error::{CoreError, CoreResult};

pub trait DictionaryProvider {
    /// Newline-delimited word list for `language`
    fn load_words(&self, language: &str) -> impl Future<Output = CoreResult<HashSet<String>>> + Send;

    /// `<char> <count>` character set for `language`
    fn load_weighted_alphabet(
        &self,
        language: &str,
    ) -> impl Future<Output = CoreResult<WeightedAlphabet>> + Send;
}

/// Reads `<root>/dictionaries/<language>.txt` and
/// `<root>/character_sets/<language>.txt`.
#[derive(Debug, Clone)]
pub struct FileDictionaryProvider {
    root: PathBuf,
}

impl FileDictionaryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn words_path(&self, language: &str) -> PathBuf {
        self.root.join("dictionaries").join(format!("{language}.txt"))
    }

    pub fn character_set_path(&self, language: &str) -> PathBuf {
        self.root
            .join("character_sets")
            .join(format!("{language}.txt"))
    }
}

async fn read_text(path: &Path) -> CoreResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl DictionaryProvider for FileDictionaryProvider {
    async fn load_words(&self, language: &str) -> CoreResult<HashSet<String>> {
        let path = self.words_path(language);
        let text = read_text(&path).await?;
        let words = parse_word_list(&text);
        log::debug!("Read {} words from {}", words.len(), path.display());
        Ok(words)
    }

    async fn load_weighted_alphabet(&self, language: &str) -> CoreResult<WeightedAlphabet> {
        let path = self.character_set_path(language);
        let text = read_text(&path).await?;
        WeightedAlphabet::parse(&text)
    }
}

/// Serves word lists and character sets from memory
#[derive(Debug, Clone, Default)]
pub struct StaticDictionaryProvider {
    words: HashMap<String, String>,
    character_sets: HashMap<String, String>,
}

impl StaticDictionaryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(
        mut self,
        language: impl Into<String>,
        word_list: impl Into<String>,
        character_set: impl Into<String>,
    ) -> Self {
        let language = language.into();
        self.words.insert(language.clone(), word_list.into());
        self.character_sets.insert(language, character_set.into());
        self
    }
}

impl DictionaryProvider for StaticDictionaryProvider {
    async fn load_words(&self, language: &str) -> CoreResult<HashSet<String>> {
        self.words
            .get(language)
            .map(|text| parse_word_list(text))
            .ok_or_else(|| CoreError::UnknownLanguage(language.to_string()))
    }

    async fn load_weighted_alphabet(&self, language: &str) -> CoreResult<WeightedAlphabet> {
        let text = self
            .character_sets
            .get(language)
            .ok_or_else(|| CoreError::UnknownLanguage(language.to_string()))?;
        WeightedAlphabet::parse(text)
    }
}
