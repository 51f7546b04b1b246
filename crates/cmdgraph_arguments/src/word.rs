//! Single-word arguments.
//!
//! A word is one token with no separator in it. It can optionally be
//! restricted to a fixed list of legal values, in which case it behaves like
//! a set of literals on the client and a case-insensitive choice on the server.
//!
//! Keep restriction lists short: every legal value becomes its own sibling
//! node in the declared graph, and an oversized graph can stall the client
//! during login.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use cmdgraph_foundation::{ConfigurationError, ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::argument::{ArgumentType, TokenSpan};
use crate::node::{NodeSpec, NodeType, ParserSpec, StringMode};
use crate::tokenizer::{SEPARATOR, eq_ignore_case};

/// A single word, optionally restricted to a list of legal values.
///
/// Equality and hashing look only at the restriction list, in order. Two
/// words restricted to `["true", "false"]` and `["false", "true"]` are not
/// equal.
#[derive(Clone, Debug)]
pub struct ArgumentWord {
    id: String,
    restrictions: Option<Arc<[String]>>,
    suggestions: Option<String>,
}

impl ArgumentWord {
    /// The token contained the separator.
    pub const SPACE_ERROR: ErrorCode = 1;
    /// The token matched none of the restrictions.
    pub const RESTRICTION_ERROR: ErrorCode = 2;

    /// Creates an unrestricted word argument.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            restrictions: None,
            suggestions: None,
        }
    }

    /// Restricts the accepted words.
    ///
    /// An empty list parses and declares like an unrestricted word, but is
    /// still not equal to one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyRestriction`] if any entry is empty,
    /// or [`ConfigurationError::RestrictionContainsSeparator`] if an entry
    /// could never be a single token.
    pub fn with_restrictions<I, S>(mut self, restrictions: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let restrictions: Vec<String> = restrictions.into_iter().map(Into::into).collect();
        for (index, restriction) in restrictions.iter().enumerate() {
            if restriction.is_empty() {
                return Err(ConfigurationError::EmptyRestriction {
                    argument: self.id,
                    index,
                });
            }
            if restriction.contains(SEPARATOR) {
                return Err(ConfigurationError::RestrictionContainsSeparator {
                    argument: self.id,
                    restriction: restriction.clone(),
                });
            }
        }

        self.restrictions = Some(restrictions.into());
        Ok(self)
    }

    /// Sets the suggestions provider advertised on the argument node.
    #[must_use]
    pub fn with_suggestions(mut self, provider: impl Into<String>) -> Self {
        self.suggestions = Some(provider.into());
        self
    }

    /// Returns true if the word selection is restricted.
    #[must_use]
    pub fn has_restrictions(&self) -> bool {
        self.restrictions.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Returns the word restrictions, if any were set.
    #[must_use]
    pub fn restrictions(&self) -> Option<&[String]> {
        self.restrictions.as_deref()
    }

    fn error(message: &str, input: &str, code: ErrorCode) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::Word, message, input, code)
    }
}

impl ArgumentType for ArgumentWord {
    type Output = String;

    fn id(&self) -> &str {
        &self.id
    }

    fn token_span(&self) -> TokenSpan {
        TokenSpan::Single
    }

    fn parse(&self, input: &str) -> Result<String, SyntaxError> {
        if input.contains(SEPARATOR) {
            return Err(Self::error(
                "Word cannot contain space character",
                input,
                Self::SPACE_ERROR,
            ));
        }

        // Restrictions act as literals, but the caller's casing is kept
        if let Some(restrictions) = self.restrictions.as_ref().filter(|r| !r.is_empty()) {
            if restrictions.iter().any(|r| eq_ignore_case(input, r)) {
                return Ok(input.to_string());
            }
            return Err(Self::error(
                "Word needs to be in the restriction list",
                input,
                Self::RESTRICTION_ERROR,
            ));
        }

        Ok(input.to_string())
    }

    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        let parser = ParserSpec::string(StringMode::SingleWord);

        match self.restrictions.as_ref().filter(|r| !r.is_empty()) {
            Some(restrictions) => restrictions
                .iter()
                .map(|word| NodeSpec {
                    node_type: NodeType::Literal,
                    name: word.clone(),
                    executable,
                    parser: Some(parser.clone()),
                    suggestions: None,
                    restrictions: Some(Arc::clone(restrictions)),
                })
                .collect(),
            None => {
                let mut node = NodeSpec::argument(self.id.clone(), parser, executable);
                node.suggestions.clone_from(&self.suggestions);
                vec![node]
            }
        }
    }
}

impl PartialEq for ArgumentWord {
    fn eq(&self, other: &Self) -> bool {
        self.restrictions == other.restrictions
    }
}

impl Eq for ArgumentWord {}

impl Hash for ArgumentWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.restrictions.hash(state);
    }
}
