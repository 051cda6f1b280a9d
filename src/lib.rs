//! fuzzylex - delete-based fuzzy lookup over a weighted vocabulary
//!
//! A [`Lexicon`] indexes every vocabulary word together with all strings reachable
//! from it by deleting up to `max_distance` characters. A query generates the same
//! kind of deletes, looks them up, and reconciles both deletion counts into a true
//! edit distance. Lookups are therefore much cheaper than comparing the query with
//! every word, at the price of an index that grows combinatorially with
//! `max_distance`.
//!
//! Examples
//!
//! - Runtime construction from `(line, weight)` pairs:
//!
//! ```
//! use fuzzylex::Lexicon;
//!
//! let mut lexicon = Lexicon::new(2);
//! lexicon.build_dictionary([("hello world", 3), ("help", 1)]);
//! let suggestions = lexicon.suggest("helo", 2, 10);
//! assert!(suggestions.iter().any(|s| s.word == "hello"));
//! ```
//!
//! - Compile-time embedding of the corpus (the lexicon itself is still built at
//!   runtime):
//!
//! ```ignore
//! use fuzzylex::include_corpus;
//!
//! let lexicon = include_corpus!("path/to/corpus.txt", max_distance = 2, weighted = true);
//! let suggestions = lexicon.suggest("helo", 2, 10);
//! ```

pub mod corpus;
pub mod distance;
pub mod edits;
pub mod error;
pub mod lexicon;
pub mod suggest;

pub use corpus::CorpusFormat;
pub use error::{Error, Result};
pub use lexicon::{Backref, BackrefPolicy, Lexicon, LexiconConfig, LexiconEntry};
pub use suggest::Suggestion;

/// Re-export the compile-time corpus macro from the proc-macro crate.
///
///   use fuzzylex::include_corpus;
pub use fuzzylex_macros::include_corpus;
