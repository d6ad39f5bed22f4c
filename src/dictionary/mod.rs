//! Word/definition dictionary served from a BK-tree.
//!
//! [`Dictionary`] owns the tree and the flat word list it was built from, and
//! exposes the operations the console offers: insertion of new words, exact
//! lookup, spell checking with escalating edit distance, sentence correction
//! and a timing comparison against a linear scan.

pub mod sentence;
pub mod store;

use std::{ops::Range, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    bk_tree::{BkTree, Match, TreeError, brute_query},
    helpers::{capitalize, timed},
};
use sentence::tokenize;
pub use store::{Entry, StoreError, WordStore};

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid word {0:?}")]
    InvalidWord(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Largest edit distance tried when looking for suggestions.
    pub max_suggestion_distance: usize,
    pub max_suggestions: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            max_suggestion_distance: 2,
            max_suggestions: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    Added,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellCheck {
    Correct { word: String, definition: String },
    /// Exactly one word was found at the smallest distance with any match.
    Corrected(String),
    Suggestions(Vec<String>),
    NoSuggestions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedWord {
    pub word: String,
    /// Byte range of the word in the input sentence.
    pub span: Range<usize>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceCorrection {
    pub corrected: String,
    pub unresolved: Vec<UnresolvedWord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub found: Option<(String, String)>,
    pub tree_time: Duration,
    pub brute_time: Duration,
    /// Words returned by each search, sorted.
    pub tree_hits: Vec<String>,
    pub brute_hits: Vec<String>,
}

impl Comparison {
    pub fn agree(&self) -> bool {
        self.tree_hits == self.brute_hits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub size: usize,
    pub max_depth: usize,
    pub build_time: Duration,
}

pub struct Dictionary {
    tree: BkTree<String, String>,
    words: Vec<String>,
    build_time: Duration,
    config: DictionaryConfig,
}

impl Dictionary {
    pub fn from_entries(
        entries: Vec<Entry>,
        config: DictionaryConfig,
    ) -> Result<Self, DictionaryError> {
        let words: Vec<String> = entries.iter().map(|e| e.word.clone()).collect();
        let (tree, build_time) = timed(|| {
            BkTree::build(entries.into_iter().map(|e| (e.word, e.definition)))
        });
        let tree = tree?;
        info!(
            words = tree.len(),
            depth = tree.max_depth(),
            elapsed_ms = build_time.as_millis() as u64,
            "built BK-tree"
        );
        Ok(Self {
            tree,
            words,
            build_time,
            config,
        })
    }

    pub fn open(store: &WordStore, config: DictionaryConfig) -> Result<Self, DictionaryError> {
        Self::from_entries(store.load()?, config)
    }

    fn query(
        &self,
        word: &str,
        radius: usize,
    ) -> Result<Vec<Match<'_, String, String>>, DictionaryError> {
        debug!(word, radius, "querying BK-tree");
        let radius = i64::try_from(radius).unwrap_or(i64::MAX);
        Ok(self.tree.query(word, radius)?)
    }

    /// Adds a word unless it is already present. `persist` runs before the
    /// tree is touched, so a failed write leaves the dictionary unchanged.
    pub fn insert_word<F>(
        &mut self,
        word: &str,
        definition: &str,
        persist: F,
    ) -> Result<Insertion, DictionaryError>
    where
        F: FnOnce(&Entry) -> Result<(), StoreError>,
    {
        let word = word.trim();
        if word.is_empty() {
            warn!("rejected insertion of an empty word");
            return Err(DictionaryError::InvalidWord(word.to_string()));
        }
        if !self.query(word, 0)?.is_empty() {
            warn!(word, "word already exists");
            return Ok(Insertion::AlreadyExists);
        }

        let entry = Entry::new(word, definition);
        persist(&entry)?;
        self.words.push(entry.word.clone());
        self.tree.insert(entry.word, entry.definition);
        info!(word, "inserted word");
        Ok(Insertion::Added)
    }

    pub fn lookup(&self, word: &str) -> Result<Option<(&str, &str)>, DictionaryError> {
        Ok(self
            .query(word, 0)?
            .first()
            .map(|m| (m.key.as_str(), m.payload.as_str())))
    }

    /// Tries radii 1 up to the configured maximum and stops at the first one
    /// that yields anything.
    fn nearest(&self, word: &str) -> Result<Vec<&str>, DictionaryError> {
        for radius in 1..=self.config.max_suggestion_distance {
            let hits = self.query(word, radius)?;
            if !hits.is_empty() {
                return Ok(hits.into_iter().map(|m| m.key.as_str()).collect());
            }
        }
        Ok(Vec::new())
    }

    fn capped(&self, words: Vec<&str>) -> Vec<String> {
        words
            .into_iter()
            .take(self.config.max_suggestions)
            .map(str::to_string)
            .collect()
    }

    pub fn spellcheck(&self, word: &str) -> Result<SpellCheck, DictionaryError> {
        if let Some((word, definition)) = self.lookup(word)? {
            return Ok(SpellCheck::Correct {
                word: word.to_string(),
                definition: definition.to_string(),
            });
        }
        let nearest = self.nearest(word)?;
        Ok(match nearest.as_slice() {
            [] => SpellCheck::NoSuggestions,
            [only] => SpellCheck::Corrected(only.to_string()),
            _ => SpellCheck::Suggestions(self.capped(nearest)),
        })
    }

    /// Replaces each unknown word that has a single candidate one edit away,
    /// keeping its capital letter and trailing punctuation. Everything else
    /// is left as written and reported with suggestions.
    pub fn correct_sentence(&self, sentence: &str) -> Result<SentenceCorrection, DictionaryError> {
        let mut pieces = Vec::new();
        let mut unresolved = Vec::new();

        for token in tokenize(sentence) {
            if token.word.is_empty() || !self.query(&token.word, 0)?.is_empty() {
                pieces.push(format!("{}{}", token.text, token.punctuation));
                continue;
            }

            let candidates = self.query(&token.word, 1)?;
            if let [only] = candidates.as_slice() {
                let replacement = if token.capitalized {
                    capitalize(only.key)
                } else {
                    only.key.clone()
                };
                pieces.push(format!("{}{}", replacement, token.punctuation));
                continue;
            }

            pieces.push(format!("{}{}", token.text, token.punctuation));
            unresolved.push(UnresolvedWord {
                word: token.text.to_string(),
                span: token.span.clone(),
                suggestions: self.capped(self.nearest(&token.word)?),
            });
        }

        Ok(SentenceCorrection {
            corrected: pieces.join(" "),
            unresolved,
        })
    }

    /// Times an exact tree query against a scan of the whole word list.
    pub fn compare_queries(&self, word: &str) -> Result<Comparison, DictionaryError> {
        let found = self
            .lookup(word)?
            .map(|(w, d)| (w.to_string(), d.to_string()));
        let (tree_hits, tree_time) = timed(|| self.query(word, 0));
        let (brute_hits, brute_time) =
            timed(|| brute_query(word, &self.words, self.tree.metric(), 0));
        let mut tree_hits: Vec<String> = tree_hits?.into_iter().map(|m| m.key.clone()).collect();
        tree_hits.sort();
        let mut brute_hits: Vec<String> = brute_hits.into_iter().cloned().collect();
        brute_hits.sort();
        Ok(Comparison {
            found,
            tree_time,
            brute_time,
            tree_hits,
            brute_hits,
        })
    }

    pub fn stats(&self) -> Stats {
        Stats {
            size: self.tree.len(),
            max_depth: self.tree.max_depth(),
            build_time: self.build_time,
        }
    }
}
