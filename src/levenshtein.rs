//! Edit distance used to key the BK-tree.

use std::cmp::min;

/// A discrete distance over keys of type `K`.
///
/// Implementations must be symmetric, return zero only for equal keys and
/// respect the triangle inequality, otherwise [`crate::bk_tree::BkTree`]
/// prunes subtrees that still hold matches. The result must also be stable
/// across calls since bucket keys are never recomputed.
pub trait Metric<K: ?Sized> {
    fn distance(&self, a: &K, b: &K) -> usize;
}

/// Unit-cost Levenshtein distance over the `char`s of a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl<S: AsRef<str> + ?Sized> Metric<S> for Levenshtein {
    fn distance(&self, a: &S, b: &S) -> usize {
        let a: Vec<char> = a.as_ref().chars().collect();
        let b: Vec<char> = b.as_ref().chars().collect();
        levenshtein(&a, &b)
    }
}

/// Levenshtein distance between two symbol sequences.
///
/// Fills the whole `(m+1) x (n+1)` Wagner-Fischer matrix where `d[i][j]` is
/// the cost of turning the first `i` symbols of `a` into the first `j`
/// symbols of `b`.
#[allow(clippy::needless_range_loop)]
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let m = a.len();
    let n = b.len();

    let mut d = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..=m {
        d[i][0] = i;
    }
    for j in 0..=n {
        d[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            d[i][j] = min(
                min(
                    d[i - 1][j] + 1, // deletion
                    d[i][j - 1] + 1, // insertion
                ),
                d[i - 1][j - 1] + cost, // substitution
            );
        }
    }

    d[m][n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(a: &str, b: &str) -> usize {
        Levenshtein.distance(a, b)
    }

    const WORDS: [&str; 10] = [
        "", "a", "cat", "cats", "bat", "kitten", "sitting", "flaw", "lawn", "über",
    ];

    #[test]
    fn test_known_distances() {
        assert_eq!(dist("kitten", "sitting"), 3);
        assert_eq!(dist("flaw", "lawn"), 2);
        assert_eq!(dist("cat", "cats"), 1);
        assert_eq!(dist("cat", "bat"), 1);
        assert_eq!(dist("saturday", "sunday"), 3);
    }

    #[test]
    fn test_empty_sequences() {
        assert_eq!(dist("", ""), 0);
        assert_eq!(dist("", "abc"), 3);
        assert_eq!(dist("abcd", ""), 4);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(dist("über", "uber"), 1);
        assert_eq!(dist("日本", "日本語"), 1);
    }

    #[test]
    fn test_generic_sequences() {
        assert_eq!(levenshtein(&[1, 2, 3], &[1, 3]), 1);
        assert_eq!(levenshtein::<u8>(&[], &[]), 0);
        assert_eq!(levenshtein(b"kitten", b"sitting"), 3);
    }

    #[test]
    fn test_metric_properties() {
        for a in WORDS {
            assert_eq!(dist(a, a), 0);
            for b in WORDS {
                assert_eq!(dist(a, b), dist(b, a), "symmetry {a:?} {b:?}");
                if a != b {
                    assert!(dist(a, b) > 0, "identity {a:?} {b:?}");
                }
                for c in WORDS {
                    assert!(
                        dist(a, b) <= dist(a, c) + dist(c, b),
                        "triangle {a:?} {b:?} {c:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_string_and_str_agree() {
        let a = String::from("kitten");
        let b = String::from("sitting");
        assert_eq!(Levenshtein.distance(&a, &b), dist("kitten", "sitting"));
    }
}
