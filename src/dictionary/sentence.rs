use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::helpers::decapitalize;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<word>[^\s.,?!]*(?:[.,?!]+[^\s.,?!]+)*)(?P<punct>[.,?!]*)")
        .expect("token pattern is valid")
});

/// A whitespace-separated piece of a sentence, split into the word and the
/// punctuation trailing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word as written, without trailing punctuation.
    pub text: &'a str,
    /// Lowercased form used for lookups.
    pub word: String,
    pub punctuation: &'a str,
    pub capitalized: bool,
    /// Byte range of `text` inside the sentence.
    pub span: Range<usize>,
}

pub fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for piece in sentence.split_whitespace() {
        // split_whitespace yields subslices of `sentence` in order
        let start = offset + sentence[offset..].find(piece).unwrap_or(0);
        offset = start + piece.len();

        let Some(caps) = TOKEN_REGEX.captures(piece) else {
            continue;
        };
        let text = caps.name("word").map_or("", |m| m.as_str());
        let punctuation = &piece[text.len()..];
        let (word, capitalized) = decapitalize(text);
        tokens.push(Token {
            text,
            word,
            punctuation,
            capitalized,
            span: start..start + text.len(),
        });
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = tokenize("Helo wrld, how are yuo?");
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["helo", "wrld", "how", "are", "yuo"]);
        assert!(tokens[0].capitalized);
        assert!(!tokens[1].capitalized);
        assert_eq!(tokens[1].punctuation, ",");
        assert_eq!(tokens[4].punctuation, "?");
        assert_eq!(tokens[4].text, "yuo");
    }

    #[test]
    fn test_spans_point_into_sentence() {
        let sentence = "the  cat sat. the cat!";
        for token in tokenize(sentence) {
            assert_eq!(&sentence[token.span.clone()], token.text);
        }
        let tokens = tokenize(sentence);
        assert_eq!(tokens[3].span, 14..17);
        assert_eq!(tokens[4].span, 18..21);
    }

    #[test]
    fn test_inner_punctuation_stays_in_word() {
        let tokens = tokenize("e.g. done!!");
        assert_eq!(tokens[0].text, "e.g");
        assert_eq!(tokens[0].punctuation, ".");
        assert_eq!(tokens[1].text, "done");
        assert_eq!(tokens[1].punctuation, "!!");
    }

    #[test]
    fn test_bare_punctuation() {
        let tokens = tokenize("wait ...");
        assert_eq!(tokens[1].text, "");
        assert_eq!(tokens[1].punctuation, "...");
    }
}
