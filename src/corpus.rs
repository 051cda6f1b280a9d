/*!
Corpus reading.

Turns a text source into the `(line -> weight)` mapping that
[`Lexicon::build_dictionary`](crate::Lexicon::build_dictionary) consumes.
Blank lines and lines starting with `#` are ignored. Repeated lines
accumulate their weights.
*/

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::{Error, Result};

/// Layout of a corpus source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorpusFormat {
    /// `<text> <weight>`: the weight is the last whitespace-separated token.
    #[default]
    Weighted,
    /// Every line is text with weight 1.
    Plain,
}

/// Read every line of `reader` into a `(line -> weight)` map.
///
/// ```
/// use fuzzylex::corpus::{read_corpus, CorpusFormat};
///
/// let source = "# greetings\nhello world 3\n\nhello world 2\n";
/// let corpus = read_corpus(source.as_bytes(), CorpusFormat::Weighted).unwrap();
/// assert_eq!(corpus["hello world"], 5);
/// ```
///
/// # Errors
///
/// Fails on I/O errors and, for [`CorpusFormat::Weighted`], on a line whose
/// weight is missing or is not a non-negative integer.
pub fn read_corpus<R: BufRead>(reader: R, format: CorpusFormat) -> Result<HashMap<String, usize>> {
    let mut corpus: HashMap<String, usize> = HashMap::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (text, weight) = match format {
            CorpusFormat::Plain => (trimmed, 1),
            CorpusFormat::Weighted => parse_weighted(trimmed, lineno + 1)?,
        };

        let slot = corpus.entry(text.to_string()).or_insert(0);
        *slot = slot.saturating_add(weight);
    }

    Ok(corpus)
}

fn parse_weighted(line: &str, lineno: usize) -> Result<(&str, usize)> {
    let (text, weight) = line
        .rsplit_once(char::is_whitespace)
        .ok_or(Error::MissingWeight { line: lineno })?;
    let weight = weight.parse::<usize>().map_err(|_| Error::InvalidWeight {
        line: lineno,
        value: weight.to_string(),
    })?;
    Ok((text.trim_end(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_lines_keep_inner_spaces() {
        let corpus = read_corpus("brown fox jumped 10\ncat\t5\n".as_bytes(), CorpusFormat::Weighted)
            .unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus["brown fox jumped"], 10);
        assert_eq!(corpus["cat"], 5);
    }

    #[test]
    fn plain_lines_weigh_one() {
        let corpus = read_corpus("apple\n  apple  \n# note\npear\n".as_bytes(), CorpusFormat::Plain)
            .unwrap();
        assert_eq!(corpus["apple"], 2);
        assert_eq!(corpus["pear"], 1);
        assert!(!corpus.contains_key("# note"));
    }

    #[test]
    fn missing_weight_reports_line() {
        let err = read_corpus("ok 1\n\nlonely\n".as_bytes(), CorpusFormat::Weighted).unwrap_err();
        assert!(matches!(err, Error::MissingWeight { line: 3 }));
    }

    #[test]
    fn invalid_weight_reports_value() {
        let err = read_corpus("word -4\n".as_bytes(), CorpusFormat::Weighted).unwrap_err();
        match err {
            Error::InvalidWeight { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "-4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
