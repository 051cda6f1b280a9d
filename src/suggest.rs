/*!
Query side of the lexicon.

A query is answered by walking its delete-variants breadth-first, one
deletion level at a time, and looking every variant up in the lexicon. A hit
yields the key itself (when it is a real word) and every vocabulary word
backreferenced from it. Because the index and the query may both have
deleted characters, the distance of each hit is reconciled with
[`true_distance`] before it is accepted.
*/

use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::distance::levenshtein;
use crate::edits::{generate_deletes, EditVariant};
use crate::lexicon::{Backref, Lexicon};

/// A correction candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    /// Corpus frequency of `word`. An exact match reports the lexicon's
    /// maximum frequency instead, so that it ranks first.
    pub frequency: usize,
    /// Levenshtein distance from the query to `word`.
    pub distance: u8,
}

/// Reconcile the deletion distances of a backref and a query-side candidate
/// into the edit distance between the backref's word and the original query.
///
/// When deletions happened on only one side the deletion count on that side
/// is exact. When both sides deleted characters neither count can be trusted
/// (`bank` and `bnak` share deletes, and so do `bank` and `xban`) and the
/// distance is recomputed.
pub fn true_distance(backref: &Backref, candidate: &EditVariant, query: &str) -> u8 {
    if backref.word() == query {
        0
    } else if backref.distance() == 0 {
        candidate.distance
    } else if candidate.distance == 0 {
        backref.distance()
    } else {
        levenshtein(backref.word(), query)
    }
}

/// Suggestions keyed by word. The first suggestion recorded for a word wins.
#[derive(Default)]
struct Found {
    order: Vec<Suggestion>,
    words: HashSet<String>,
}

impl Found {
    fn insert(&mut self, suggestion: Suggestion) {
        if self.words.insert(suggestion.word.clone()) {
            self.order.push(suggestion);
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_vec(self) -> Vec<Suggestion> {
        self.order
    }
}

impl Lexicon {
    /// Look up corrections for `query` within `max_edit_distance`.
    ///
    /// Results are sorted by frequency, highest first. The walk stops as soon
    /// as `max_results` distinct words have been collected, so the result is
    /// a best-effort set: it may hold slightly more than `max_results` words
    /// and is not guaranteed to be the global top `max_results`. Use
    /// [`suggest_top`](Self::suggest_top) for a strict top-K.
    ///
    /// `query` is matched as-is; lowercase it first if the lexicon was built
    /// with lowercasing.
    ///
    /// ```
    /// use fuzzylex::Lexicon;
    ///
    /// let mut lexicon = Lexicon::new(2);
    /// lexicon.build_dictionary([("brown fox jumped", 10)]);
    /// let suggestions = lexicon.suggest("browne", 1, 10);
    /// assert_eq!(suggestions[0].word, "brown");
    /// assert_eq!(suggestions[0].distance, 1);
    /// ```
    pub fn suggest(&self, query: &str, max_edit_distance: u8, max_results: usize) -> Vec<Suggestion> {
        if max_results == 0 {
            return Vec::new();
        }
        let mut suggestions = self.walk(query, max_edit_distance, Some(max_results));
        suggestions.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        suggestions
    }

    /// Strict top-K variant of [`suggest`](Self::suggest).
    ///
    /// Collects every suggestion within `max_edit_distance`, orders them by
    /// frequency (highest first), then distance, then word, and keeps the
    /// first `max_results`.
    pub fn suggest_top(
        &self,
        query: &str,
        max_edit_distance: u8,
        max_results: usize,
    ) -> Vec<Suggestion> {
        if max_results == 0 {
            return Vec::new();
        }
        let mut suggestions = self.walk(query, max_edit_distance, None);
        suggestions.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.distance.cmp(&b.distance))
                .then_with(|| a.word.cmp(&b.word))
        });
        suggestions.truncate(max_results);
        suggestions
    }

    /// Breadth-first walk over the query's delete-variants. Returns suggestions
    /// in discovery order. With `limit` set, stops once that many words are found.
    fn walk(&self, query: &str, max_edit_distance: u8, limit: Option<usize>) -> Vec<Suggestion> {
        let mut queue: VecDeque<EditVariant> = VecDeque::new();
        let mut queued: HashSet<String> = HashSet::new();
        queue.push_back(EditVariant::new(query, 0));
        queued.insert(query.to_string());

        let mut found = Found::default();
        let mut visited = 0usize;

        while let Some(candidate) = queue.pop_front() {
            // Breadth-first: everything still queued is at least this deep.
            if candidate.distance > max_edit_distance {
                break;
            }
            visited += 1;

            if let Some(entry) = self.entry(&candidate.text) {
                if let Some(word) = entry.word() {
                    let frequency = if candidate.distance == 0 {
                        self.max_frequency()
                    } else {
                        entry.frequency()
                    };
                    found.insert(Suggestion {
                        word: word.to_string(),
                        frequency,
                        distance: candidate.distance,
                    });
                }

                for backref in entry.backrefs() {
                    let distance = true_distance(backref, &candidate, query);
                    if distance > max_edit_distance {
                        continue;
                    }
                    if let Some(frequency) = self.frequency(backref.word()) {
                        found.insert(Suggestion {
                            word: backref.word().to_string(),
                            frequency,
                            distance,
                        });
                    }
                }

                if limit.is_some_and(|limit| found.len() >= limit) {
                    break;
                }
            }

            if candidate.distance < max_edit_distance {
                for variant in generate_deletes(&candidate.text, candidate.distance, false, max_edit_distance) {
                    if queued.insert(variant.text.clone()) {
                        queue.push_back(variant);
                    }
                }
            }
        }

        debug!(
            "suggest {:?} (max distance {}): visited {} candidates, found {}",
            query,
            max_edit_distance,
            visited,
            found.len()
        );
        found.into_vec()
    }
}
