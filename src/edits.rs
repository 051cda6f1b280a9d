/*!
Delete-variant generation.

Both sides of the index are built from the same primitive: remove characters
from a string and remember how many were removed. At indexing time every
vocabulary word is expanded recursively up to the configured depth; at query
time the suggestion walk asks for one level at a time.

Cost: a word of length `L` expanded to depth `K` yields at most
`C(L,1) + C(L,2) + ... + C(L,K)` distinct strings. This is the dominant cost of
both building a lexicon and of answering a query, and it grows steeply with
`K` for long words. Keep `K` small (2 is the usual choice).
*/

use std::collections::HashSet;

/// A string reached by deleting characters from another, with the number of
/// deletions used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditVariant {
    pub text: String,
    pub distance: u8,
}

impl EditVariant {
    pub fn new(text: impl Into<String>, distance: u8) -> Self {
        Self {
            text: text.into(),
            distance,
        }
    }
}

/// Generate the delete-variants of `word`.
///
/// Every variant produced directly from `word` is tagged `base_distance + 1`.
/// When `recursive` is set, each new variant is expanded again while its
/// distance is below `max_distance`. Results are deduplicated by text within
/// this call, keeping the first distance at which a text was produced, and are
/// returned in depth-first discovery order.
///
/// Words of zero or one character have nothing to delete and yield nothing.
///
/// ```
/// use fuzzylex::edits::generate_deletes;
///
/// let variants = generate_deletes("abc", 0, true, 2);
/// let texts: Vec<&str> = variants.iter().map(|v| v.text.as_str()).collect();
/// assert_eq!(texts, ["bc", "c", "b", "ac", "a", "ab"]);
/// ```
pub fn generate_deletes(
    word: &str,
    base_distance: u8,
    recursive: bool,
    max_distance: u8,
) -> Vec<EditVariant> {
    let mut variants: Vec<EditVariant> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    // Explicit depth-first work list. Children are pushed in reverse so they
    // pop in left-to-right deletion order.
    let mut stack: Vec<EditVariant> = Vec::new();
    push_single_deletes(&mut stack, word, base_distance.saturating_add(1));

    while let Some(variant) = stack.pop() {
        if !seen.insert(variant.text.clone()) {
            continue;
        }
        if recursive && variant.distance < max_distance {
            push_single_deletes(&mut stack, &variant.text, variant.distance.saturating_add(1));
        }
        variants.push(variant);
    }

    variants
}

/// Push every single-character deletion of `text` onto `stack`, last position first.
fn push_single_deletes(stack: &mut Vec<EditVariant>, text: &str, distance: u8) {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 1 {
        return;
    }
    for skip in (0..chars.len()).rev() {
        let deleted: String = chars
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &c)| c)
            .collect();
        stack.push(EditVariant::new(deleted, distance));
    }
}
