//! Command line tokenization.
//!
//! The separator is structurally reserved: a command line is split on it,
//! and no single-token argument may contain it. Unlike free text input,
//! token casing is preserved so arguments can hand back exactly what the
//! user typed.

use crate::argument::TokenSpan;

/// The token separator.
pub const SEPARATOR: char = ' ';

/// Opening and closing character of a quoted phrase.
pub const QUOTE: char = '"';

/// Case-insensitive string comparison.
///
/// Compares character by character: two characters match if they are equal,
/// if their upper cases are equal, or if the lower cases of their upper
/// cases are equal. Only one-to-one case mappings are used, so strings of
/// different character counts never match (`"ß"` is not `"SS"`).
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars()
            .zip(b.chars())
            .all(|(x, y)| chars_eq_ignore_case(x, y))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (upper_a, upper_b) = (simple_upper(a), simple_upper(b));
    upper_a == upper_b || simple_lower(upper_a) == simple_lower(upper_b)
}

fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    // 'İ' lowers to "i\u{307}"; its one-to-one mapping is the first char
    c.to_lowercase().next().unwrap_or(c)
}

/// Walks a command line, handing out raw token text one argument at a time.
#[derive(Clone, Debug)]
pub struct TokenCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Creates a cursor at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns true if the whole line has been consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the unconsumed remainder of the line.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos.min(self.input.len())..]
    }

    /// Byte offset of the next token.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Takes the raw text for one argument with the given span.
    ///
    /// Returns `None` once the line is exhausted.
    pub fn take(&mut self, span: TokenSpan) -> Option<&'a str> {
        if self.is_done() {
            return None;
        }
        let rest = self.remaining();
        let len = match span {
            TokenSpan::Single => rest.find(SEPARATOR).unwrap_or(rest.len()),
            TokenSpan::Quoted if rest.starts_with(QUOTE) => Self::quoted_len(rest),
            TokenSpan::Quoted => rest.find(SEPARATOR).unwrap_or(rest.len()),
            TokenSpan::Rest => rest.len(),
        };
        let token = &rest[..len];
        self.pos += len;
        if self.remaining().starts_with(SEPARATOR) {
            self.pos += SEPARATOR.len_utf8();
        }
        Some(token)
    }

    /// Length of a quoted phrase including both quotes, or of the whole
    /// remainder if it is never closed.
    fn quoted_len(rest: &str) -> usize {
        let mut escaped = false;
        for (i, ch) in rest.char_indices().skip(1) {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                QUOTE => return i + QUOTE.len_utf8(),
                _ => {}
            }
        }
        rest.len()
    }
}

/// Splits a command line into single tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<&str> {
    let mut cursor = TokenCursor::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = cursor.take(TokenSpan::Single) {
        tokens.push(token);
    }
    tokens
}
