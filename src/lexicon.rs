/*!
The lexicon: a single map that is both the vocabulary and the delete index.

Every key is either a real vocabulary word, a delete-variant of one or more
vocabulary words, or both. An entry for a real word carries its accumulated
frequency; every entry carries the backrefs to the vocabulary words it can be
reached from by deletion.

A lexicon is built by repeated ingestion and then only read. Mutation needs
`&mut Lexicon` and querying needs `&Lexicon`, so a built lexicon can be shared
between threads for lookups.
*/

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::BufRead;

use log::{debug, trace};

use crate::corpus::{read_corpus, CorpusFormat};
use crate::edits::generate_deletes;
use crate::error::Result;

/// How backrefs reaching the same key are merged during indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackrefPolicy {
    /// Keep only the backrefs with the lowest deletion distance for a key.
    /// A new backref at a lower distance discards the existing ones.
    #[default]
    Lowest,
    /// Keep every backref regardless of distance. Exposes every edit path, at
    /// the cost of a larger index.
    RetainAll,
}

/// Settings used while building a [`Lexicon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconConfig {
    /// Deletion depth used when indexing vocabulary words.
    pub max_distance: u8,
    pub policy: BackrefPolicy,
    /// Lowercase lines before splitting them into words (`add_line` and
    /// `build_dictionary` only).
    pub lowercase: bool,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            max_distance: 2,
            policy: BackrefPolicy::Lowest,
            lowercase: true,
        }
    }
}

impl LexiconConfig {
    pub fn with_max_distance(mut self, max_distance: u8) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_policy(mut self, policy: BackrefPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

/// A pointer from a delete-variant back to the vocabulary word that produced it.
///
/// Equality and hashing look at `word` only: a key holds at most one backref
/// per vocabulary word, whatever its distance.
#[derive(Debug, Clone, Eq)]
pub struct Backref {
    word: String,
    distance: u8,
}

impl Backref {
    pub fn new(word: impl Into<String>, distance: u8) -> Self {
        Self {
            word: word.into(),
            distance,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of deletions from `word` to the key holding this backref.
    pub fn distance(&self) -> u8 {
        self.distance
    }
}

impl PartialEq for Backref {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Hash for Backref {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

/// The value stored for one lexicon key.
#[derive(Debug, Clone, Default)]
pub struct LexiconEntry {
    word: Option<String>,
    frequency: usize,
    backrefs: Vec<Backref>,
}

impl LexiconEntry {
    fn with_backref(backref: Backref) -> Self {
        Self {
            word: None,
            frequency: 0,
            backrefs: vec![backref],
        }
    }

    /// The vocabulary word this key stands for, if the key is a real word.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn is_word(&self) -> bool {
        self.word.is_some()
    }

    /// Accumulated weight. Only meaningful when [`is_word`](Self::is_word) holds.
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    pub fn backrefs(&self) -> &[Backref] {
        &self.backrefs
    }

    fn merge_backref(&mut self, backref: Backref, policy: BackrefPolicy) {
        if self.backrefs.contains(&backref) {
            return;
        }
        match policy {
            BackrefPolicy::RetainAll => self.backrefs.push(backref),
            BackrefPolicy::Lowest => match self.backrefs.first().map(Backref::distance) {
                Some(best) if best > backref.distance => {
                    self.backrefs.clear();
                    self.backrefs.push(backref);
                }
                Some(best) if best < backref.distance => {}
                _ => self.backrefs.push(backref),
            },
        }
    }
}

/// Vocabulary plus delete index.
pub struct Lexicon {
    config: LexiconConfig,
    entries: HashMap<String, LexiconEntry>,
    max_frequency: usize,
    word_count: usize,
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("config", &self.config)
            .field("words", &self.word_count)
            .field("keys", &self.entries.len())
            .field("max_frequency", &self.max_frequency)
            .finish_non_exhaustive()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::with_config(LexiconConfig::default())
    }
}

impl Lexicon {
    /// Create an empty lexicon indexing deletes up to `max_distance`, with the
    /// remaining settings at their defaults.
    pub fn new(max_distance: u8) -> Self {
        Self::with_config(LexiconConfig::default().with_max_distance(max_distance))
    }

    pub fn with_config(config: LexiconConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            max_frequency: 0,
            word_count: 0,
        }
    }

    /// Build a lexicon from a `(line, weight)` source. See [`build_dictionary`](Self::build_dictionary).
    pub fn from_iter<I, S>(config: LexiconConfig, source: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::with_config(config);
        lexicon.build_dictionary(source);
        lexicon
    }

    /// Read a corpus and build a lexicon from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or a weighted line has a missing or
    /// malformed weight.
    pub fn from_reader<R: BufRead>(
        reader: R,
        format: CorpusFormat,
        config: LexiconConfig,
    ) -> Result<Self> {
        let corpus = read_corpus(reader, format)?;
        Ok(Self::from_iter(config, corpus))
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Ingest every `(line, weight)` pair with a positive weight.
    ///
    /// Each line is lowercased (unless disabled in the config), split on
    /// whitespace and every token is ingested with the line's weight. Blank
    /// lines and zero weights are skipped.
    pub fn build_dictionary<I, S>(&mut self, source: I)
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let (mut lines, mut skipped, mut tokens) = (0usize, 0usize, 0usize);
        for (line, weight) in source {
            let line = line.as_ref();
            if weight == 0 || line.trim().is_empty() {
                skipped += 1;
                continue;
            }
            lines += 1;
            tokens += self.add_line(line, weight);
        }
        debug!(
            "built lexicon: {} lines ({} skipped), {} tokens, {} words, {} keys, max frequency {}",
            lines,
            skipped,
            tokens,
            self.word_count,
            self.entries.len(),
            self.max_frequency
        );
    }

    /// Split one line into words and ingest each with `weight`.
    /// Returns the number of words ingested.
    pub fn add_line(&mut self, line: &str, weight: usize) -> usize {
        let line: Cow<'_, str> = if self.config.lowercase {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        };
        let mut count = 0;
        for token in line.split_whitespace() {
            self.ingest(token, weight);
            count += 1;
        }
        count
    }

    /// Add `weight` to `word`'s frequency, indexing its delete-variants the
    /// first time the word is seen as a vocabulary word.
    ///
    /// A word that already exists only as someone else's delete-variant is
    /// promoted to a vocabulary word and indexed. Re-ingesting a known word
    /// only accumulates frequency. The empty string is ignored.
    pub fn ingest(&mut self, word: &str, weight: usize) {
        if word.is_empty() {
            return;
        }

        let entry = self.entries.entry(word.to_owned()).or_default();
        entry.frequency = entry.frequency.saturating_add(weight);
        let frequency = entry.frequency;
        let first_sighting = entry.word.is_none();
        if first_sighting {
            entry.word = Some(word.to_owned());
        }

        if frequency > self.max_frequency {
            self.max_frequency = frequency;
        }

        if first_sighting {
            self.word_count += 1;
            self.index_deletes(word);
        }
    }

    fn index_deletes(&mut self, word: &str) {
        let policy = self.config.policy;
        let variants = generate_deletes(word, 0, true, self.config.max_distance);
        trace!("indexing {:?}: {} delete variants", word, variants.len());

        for variant in variants {
            let backref = Backref::new(word, variant.distance);
            match self.entries.entry(variant.text) {
                Entry::Occupied(mut occupied) => occupied.get_mut().merge_backref(backref, policy),
                Entry::Vacant(vacant) => {
                    vacant.insert(LexiconEntry::with_backref(backref));
                }
            }
        }
    }

    /// The entry stored under `key`, whether it is a word, a delete-variant or both.
    pub fn entry(&self, key: &str) -> Option<&LexiconEntry> {
        self.entries.get(key)
    }

    /// Frequency of a vocabulary word. `None` for unknown keys and for keys
    /// that exist only as delete-variants.
    pub fn frequency(&self, word: &str) -> Option<usize> {
        self.entries
            .get(word)
            .filter(|entry| entry.is_word())
            .map(LexiconEntry::frequency)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequency(word).is_some()
    }

    /// Largest frequency reached by any vocabulary word.
    pub fn max_frequency(&self) -> usize {
        self.max_frequency
    }

    /// Number of distinct vocabulary words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of keys, words and delete-variants together.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backref_pairs(lexicon: &Lexicon, key: &str) -> Vec<(String, u8)> {
        let mut pairs: Vec<(String, u8)> = lexicon
            .entry(key)
            .map(|e| {
                e.backrefs()
                    .iter()
                    .map(|b| (b.word().to_string(), b.distance()))
                    .collect()
            })
            .unwrap_or_default();
        pairs.sort();
        pairs
    }

    #[test]
    fn backref_identity_is_word_only() {
        assert_eq!(Backref::new("cat", 1), Backref::new("cat", 2));
        assert_ne!(Backref::new("cat", 1), Backref::new("cot", 1));
    }

    #[test]
    fn ingest_creates_word_and_deletes() {
        let mut lexicon = Lexicon::new(2);
        lexicon.ingest("cat", 5);

        let entry = lexicon.entry("cat").unwrap();
        assert_eq!(entry.word(), Some("cat"));
        assert_eq!(entry.frequency(), 5);
        assert!(entry.backrefs().is_empty());

        assert_eq!(backref_pairs(&lexicon, "ca"), [("cat".to_string(), 1)]);
        assert_eq!(backref_pairs(&lexicon, "t"), [("cat".to_string(), 2)]);
        assert!(!lexicon.entry("ca").unwrap().is_word());
        assert_eq!(lexicon.frequency("ca"), None);
        assert_eq!(lexicon.word_count(), 1);
        // cat + 3 single deletes + 3 double deletes
        assert_eq!(lexicon.key_count(), 7);
    }

    #[test]
    fn reingest_accumulates_without_reindexing() {
        let mut lexicon = Lexicon::new(2);
        lexicon.ingest("cat", 5);
        let keys = lexicon.key_count();
        let before = backref_pairs(&lexicon, "at");

        lexicon.ingest("cat", 4);
        assert_eq!(lexicon.frequency("cat"), Some(9));
        assert_eq!(lexicon.max_frequency(), 9);
        assert_eq!(lexicon.key_count(), keys);
        assert_eq!(backref_pairs(&lexicon, "at"), before);
        assert_eq!(lexicon.word_count(), 1);
    }

    #[test]
    fn delete_variant_is_promoted_to_word() {
        let mut lexicon = Lexicon::new(2);
        lexicon.ingest("cats", 3);
        assert!(!lexicon.contains("cat"));

        lexicon.ingest("cat", 5);
        let entry = lexicon.entry("cat").unwrap();
        assert_eq!(entry.word(), Some("cat"));
        assert_eq!(entry.frequency(), 5);
        assert_eq!(backref_pairs(&lexicon, "cat"), [("cats".to_string(), 1)]);
        assert_eq!(lexicon.word_count(), 2);
    }

    #[test]
    fn lowest_policy_keeps_closest_backrefs() {
        let mut lexicon = Lexicon::new(2);
        lexicon.ingest("abcd", 1);
        assert_eq!(backref_pairs(&lexicon, "ab"), [("abcd".to_string(), 2)]);

        lexicon.ingest("abc", 1);
        assert_eq!(backref_pairs(&lexicon, "ab"), [("abc".to_string(), 1)]);

        lexicon.ingest("abd", 1);
        assert_eq!(
            backref_pairs(&lexicon, "ab"),
            [("abc".to_string(), 1), ("abd".to_string(), 1)]
        );

        lexicon.ingest("abxy", 1);
        assert_eq!(
            backref_pairs(&lexicon, "ab"),
            [("abc".to_string(), 1), ("abd".to_string(), 1)]
        );
    }

    #[test]
    fn retain_all_policy_keeps_every_backref() {
        let config = LexiconConfig::default().with_policy(BackrefPolicy::RetainAll);
        let mut lexicon = Lexicon::with_config(config);
        lexicon.ingest("abcd", 1);
        lexicon.ingest("abc", 1);
        assert_eq!(
            backref_pairs(&lexicon, "ab"),
            [("abc".to_string(), 1), ("abcd".to_string(), 2)]
        );
    }

    #[test]
    fn max_frequency_tracks_largest_word() {
        let mut lexicon = Lexicon::new(1);
        lexicon.ingest("a", 3);
        lexicon.ingest("b", 7);
        lexicon.ingest("a", 2);
        assert_eq!(lexicon.max_frequency(), 7);
        lexicon.ingest("a", 5);
        assert_eq!(lexicon.max_frequency(), 10);
    }

    #[test]
    fn build_dictionary_tokenizes_and_skips() {
        let mut lexicon = Lexicon::new(1);
        lexicon.build_dictionary(vec![
            ("Brown  Fox jumped", 10),
            ("", 4),
            ("   ", 4),
            ("ignored line", 0),
            ("fox", 2),
        ]);
        assert_eq!(lexicon.frequency("brown"), Some(10));
        assert_eq!(lexicon.frequency("fox"), Some(12));
        assert_eq!(lexicon.frequency("jumped"), Some(10));
        assert!(!lexicon.contains("Brown"));
        assert!(!lexicon.contains("ignored"));
        assert_eq!(lexicon.word_count(), 3);
        assert_eq!(lexicon.max_frequency(), 12);
    }

    #[test]
    fn lowercasing_can_be_disabled() {
        let config = LexiconConfig::default().with_lowercase(false);
        let lexicon = Lexicon::from_iter(config, [("Rust rust", 1)]);
        assert_eq!(lexicon.frequency("Rust"), Some(1));
        assert_eq!(lexicon.frequency("rust"), Some(1));
    }

    #[test]
    fn empty_word_is_ignored() {
        let mut lexicon = Lexicon::new(2);
        lexicon.ingest("", 3);
        assert!(lexicon.is_empty());
        assert_eq!(lexicon.key_count(), 0);
        assert_eq!(lexicon.max_frequency(), 0);
    }

    #[test]
    fn every_key_is_a_word_or_has_backrefs() {
        let lexicon = Lexicon::from_iter(
            LexiconConfig::default(),
            [("the quick brown fox jumps over the lazy dog", 3)],
        );
        for key in lexicon.keys() {
            let entry = lexicon.entry(key).unwrap();
            assert!(entry.is_word() || !entry.backrefs().is_empty(), "{key}");
        }
    }
}
