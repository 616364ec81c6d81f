//! Word-wise motion within a single line.
//!
//! Columns are character indices. A character is either a word character,
//! a delimiter, or neither; "neither" stops both scans.

/// Symbols that count as part of a word besides ASCII letters and digits.
const WORD_SYMBOLS: &str = "_*-+@$#=><";

/// Characters skipped between words.
const DELIMITERS: &str = " \t\n,.;!?()'\"`";

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || WORD_SYMBOLS.contains(c)
}

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(c)
}

/// Column reached by a forward-word motion from `col`.
///
/// Skips delimiters, then word characters, then trailing delimiters.
/// Never moves past the end of the line. `col` must lie within the line.
pub fn forward(line: &str, mut col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    debug_assert!(col <= len, "column {} past end of line ({})", col, len);

    while col < len && is_delimiter(chars[col]) {
        col += 1;
    }
    while col < len && is_word_char(chars[col]) {
        col += 1;
    }
    while col < len && is_delimiter(chars[col]) {
        col += 1;
    }
    col
}

/// Column reached by a backward-word motion from `col`.
///
/// Skips delimiters to the left, then word characters to the left, then
/// backs off any delimiter left under the cursor.
pub fn backward(line: &str, mut col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    debug_assert!(col <= len, "column {} past end of line ({})", col, len);

    while col > 0 && is_delimiter(chars[col - 1]) {
        col -= 1;
    }
    while col > 0 && is_word_char(chars[col - 1]) {
        col -= 1;
    }
    while col > 0 && col < len && is_delimiter(chars[col]) {
        col -= 1;
    }
    col
}
