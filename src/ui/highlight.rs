//! SQL syntax highlighting
//!
//! Line-by-line tokenizer for the query editor. Presentation only: the
//! token stream never feeds back into editing.
//!
//! Every space and every character of [`SYMBOLS`] is its own `Symbol` token,
//! and the text between them is a word classified as keyword, number or
//! identifier. Concatenating the token values gives back the input line.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Token classification for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Symbol,
    /// Reserved for quoted literals; the classifier does not scan quotes.
    String,
    /// Reserved for comments; the classifier does not scan comments.
    Comment,
}

/// A classified slice of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a str,
}

/// Characters that end a word and are emitted as standalone symbols.
pub const SYMBOLS: &str = "{}[](),.;+-/*=&<>";

const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "JOIN",
    "LEFT", "RIGHT", "INNER", "OUTER", "GROUP", "ORDER", "BY", "LIMIT", "DISTINCT", "AND", "OR",
    "NOT", "IN", "LIKE", "AS",
];

static SQL_KEYWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

/// Split a line into highlight tokens.
///
/// Total and single-pass: no lookahead, no escapes, no merging.
pub fn classify(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = 0;

    for (i, ch) in line.char_indices() {
        if ch == ' ' || SYMBOLS.contains(ch) {
            if word_start < i {
                let word = &line[word_start..i];
                tokens.push(Token {
                    kind: classify_word(word),
                    value: word,
                });
            }
            let end = i + ch.len_utf8();
            tokens.push(Token {
                kind: TokenKind::Symbol,
                value: &line[i..end],
            });
            word_start = end;
        }
    }

    if word_start < line.len() {
        let word = &line[word_start..];
        tokens.push(Token {
            kind: classify_word(word),
            value: word,
        });
    }

    tokens
}

fn classify_word(word: &str) -> TokenKind {
    if is_keyword(word) {
        TokenKind::Keyword
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::Number
    } else {
        TokenKind::Identifier
    }
}

/// Case-insensitive membership in the keyword set.
pub fn is_keyword(word: &str) -> bool {
    SQL_KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}
