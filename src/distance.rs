/// Levenshtein distance (unit-cost insert, delete, substitute) between `a` and `b`.
///
/// Standard dynamic programming over a `(n+1) x (m+1)` table of `char`s.
/// Distances larger than 255 are capped at 255.
pub fn levenshtein(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (alen, blen) = (a_chars.len(), b_chars.len());

    if alen == 0 {
        return saturate(blen);
    }
    if blen == 0 {
        return saturate(alen);
    }

    let mut table: Vec<Vec<usize>> = vec![vec![0; blen + 1]; alen + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=alen {
        for j in 1..=blen {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    saturate(table[alen][blen])
}

fn saturate(distance: usize) -> u8 {
    u8::try_from(distance).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_and_empty() {
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abcd", ""), 4);
    }

    #[test]
    fn single_operations() {
        assert_eq!(levenshtein("abc", "ab"), 1);
        assert_eq!(levenshtein("ab", "abc"), 1);
        assert_eq!(levenshtein("abc", "axc"), 1);
    }

    #[test]
    fn transposition_costs_two() {
        assert_eq!(levenshtein("ab", "ba"), 2);
    }

    #[test]
    fn classic_examples() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("sunday", "saturday"), 3);
    }

    #[test]
    fn compares_characters_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn caps_at_u8_max() {
        let long = "a".repeat(300);
        assert_eq!(levenshtein(&long, ""), u8::MAX);
        assert_eq!(levenshtein("", &long), u8::MAX);
    }
}
