//! Phrase arguments: the multi-token members of the string family.
//!
//! A quotable phrase is either a bare word or a double-quoted run of tokens
//! with `\"` and `\\` escapes. A greedy phrase swallows the rest of the line.

use cmdgraph_foundation::{ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::argument::{ArgumentType, TokenSpan};
use crate::node::{NodeSpec, ParserSpec, StringMode};
use crate::tokenizer::{QUOTE, SEPARATOR};

/// How much of the line a phrase consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhraseMode {
    /// A bare word or a quoted phrase.
    Quotable,
    /// Everything to the end of the line.
    Greedy,
}

/// A quotable or greedy string argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArgumentPhrase {
    id: String,
    mode: PhraseMode,
}

impl ArgumentPhrase {
    /// Unbalanced quotes, or an unquoted token containing a space.
    pub const QUOTE_ERROR: ErrorCode = 1;
    /// A backslash followed by something other than `"` or `\`.
    pub const ESCAPE_ERROR: ErrorCode = 2;

    /// Creates a quotable phrase argument.
    #[must_use]
    pub fn quotable(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: PhraseMode::Quotable,
        }
    }

    /// Creates a greedy phrase argument. Must be last in its syntax.
    #[must_use]
    pub fn greedy(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mode: PhraseMode::Greedy,
        }
    }

    /// Returns the phrase mode.
    #[must_use]
    pub fn mode(&self) -> PhraseMode {
        self.mode
    }

    fn error(message: &str, input: &str, code: ErrorCode) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::Phrase, message, input, code)
    }

    fn parse_quoted(input: &str) -> Result<String, SyntaxError> {
        let Some(body) = input
            .strip_prefix(QUOTE)
            .and_then(|rest| rest.strip_suffix(QUOTE))
        else {
            return Err(Self::error(
                "Phrase is missing a closing quote",
                input,
                Self::QUOTE_ERROR,
            ));
        };

        let mut out = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some(escaped @ ('"' | '\\')) => out.push(escaped),
                    _ => {
                        return Err(Self::error(
                            "Invalid escape sequence",
                            input,
                            Self::ESCAPE_ERROR,
                        ));
                    }
                },
                // An unescaped quote closed the phrase early
                '"' => {
                    return Err(Self::error(
                        "Unexpected quote inside phrase",
                        input,
                        Self::QUOTE_ERROR,
                    ));
                }
                _ => out.push(ch),
            }
        }
        Ok(out)
    }
}

impl ArgumentType for ArgumentPhrase {
    type Output = String;

    fn id(&self) -> &str {
        &self.id
    }

    fn token_span(&self) -> TokenSpan {
        match self.mode {
            PhraseMode::Quotable => TokenSpan::Quoted,
            PhraseMode::Greedy => TokenSpan::Rest,
        }
    }

    fn parse(&self, input: &str) -> Result<String, SyntaxError> {
        match self.mode {
            PhraseMode::Greedy => Ok(input.to_string()),
            PhraseMode::Quotable if input.starts_with(QUOTE) => Self::parse_quoted(input),
            PhraseMode::Quotable => {
                if input.contains(SEPARATOR) {
                    return Err(Self::error(
                        "Phrases with spaces must be quoted",
                        input,
                        Self::QUOTE_ERROR,
                    ));
                }
                Ok(input.to_string())
            }
        }
    }

    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        let mode = match self.mode {
            PhraseMode::Quotable => StringMode::QuotablePhrase,
            PhraseMode::Greedy => StringMode::GreedyPhrase,
        };
        vec![NodeSpec::argument(
            self.id.clone(),
            ParserSpec::string(mode),
            executable,
        )]
    }
}
