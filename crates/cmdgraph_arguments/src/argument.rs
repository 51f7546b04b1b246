//! The argument contract and the closed set of argument kinds.
//!
//! Each kind implements [`ArgumentType`], which pairs the server-side parse
//! rule with the nodes the kind contributes to the declared graph. Keeping
//! both on one type is what keeps the two representations in step.
//! [`Argument`] wraps the kinds so a syntax can hold a heterogeneous list.

use std::fmt;

use cmdgraph_foundation::SyntaxError;

use crate::boolean::ArgumentBoolean;
use crate::integer::ArgumentInteger;
use crate::literal::ArgumentLiteral;
use crate::node::NodeSpec;
use crate::phrase::ArgumentPhrase;
use crate::word::ArgumentWord;

/// How much raw input the dispatcher hands to one argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenSpan {
    /// One separator-delimited token.
    Single,
    /// A quoted run of tokens, or one token if unquoted.
    Quoted,
    /// The remainder of the line.
    Rest,
}

/// A typed grammar token.
///
/// `parse` is pure: it depends only on the input and the argument's fixed
/// configuration, so it can be called concurrently without locking.
pub trait ArgumentType {
    /// The converted value.
    type Output;

    /// Identifier, unique among siblings in one command path.
    fn id(&self) -> &str;

    /// How much of the line this argument consumes.
    fn token_span(&self) -> TokenSpan;

    /// Validates and converts raw input.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the input is not valid for this argument.
    fn parse(&self, input: &str) -> Result<Self::Output, SyntaxError>;

    /// Describes the nodes this argument adds to the declared graph.
    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec>;
}

/// A parsed argument value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentValue {
    /// A matched literal.
    Literal(String),
    /// A single word, with the user's casing.
    Word(String),
    /// A phrase, with quotes and escapes removed.
    Phrase(String),
    /// A boolean.
    Boolean(bool),
    /// An integer.
    Integer(i32),
}

impl ArgumentValue {
    /// Returns the string payload of literal, word, and phrase values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(s) | Self::Word(s) | Self::Phrase(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) | Self::Word(s) | Self::Phrase(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Any argument kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    /// A fixed word.
    Literal(ArgumentLiteral),
    /// A single word, optionally restricted.
    Word(ArgumentWord),
    /// A quotable or greedy phrase.
    Phrase(ArgumentPhrase),
    /// A boolean.
    Boolean(ArgumentBoolean),
    /// A bounded integer.
    Integer(ArgumentInteger),
}

impl Argument {
    /// Identifier of the wrapped argument.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Literal(a) => a.id(),
            Self::Word(a) => a.id(),
            Self::Phrase(a) => a.id(),
            Self::Boolean(a) => a.id(),
            Self::Integer(a) => a.id(),
        }
    }

    /// How much of the line the wrapped argument consumes.
    #[must_use]
    pub fn token_span(&self) -> TokenSpan {
        match self {
            Self::Literal(a) => a.token_span(),
            Self::Word(a) => a.token_span(),
            Self::Phrase(a) => a.token_span(),
            Self::Boolean(a) => a.token_span(),
            Self::Integer(a) => a.token_span(),
        }
    }

    /// Parses input with the wrapped argument.
    ///
    /// # Errors
    ///
    /// Returns the wrapped argument's [`SyntaxError`].
    pub fn parse(&self, input: &str) -> Result<ArgumentValue, SyntaxError> {
        Ok(match self {
            Self::Literal(a) => ArgumentValue::Literal(a.parse(input)?),
            Self::Word(a) => ArgumentValue::Word(a.parse(input)?),
            Self::Phrase(a) => ArgumentValue::Phrase(a.parse(input)?),
            Self::Boolean(a) => ArgumentValue::Boolean(a.parse(input)?),
            Self::Integer(a) => ArgumentValue::Integer(a.parse(input)?),
        })
    }

    /// Nodes the wrapped argument contributes.
    #[must_use]
    pub fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        match self {
            Self::Literal(a) => a.contribute_nodes(executable),
            Self::Word(a) => a.contribute_nodes(executable),
            Self::Phrase(a) => a.contribute_nodes(executable),
            Self::Boolean(a) => a.contribute_nodes(executable),
            Self::Integer(a) => a.contribute_nodes(executable),
        }
    }

    /// Number of legal values if this is a restricted word.
    #[must_use]
    pub fn restriction_count(&self) -> Option<usize> {
        match self {
            Self::Word(w) => w.restrictions().map(<[String]>::len),
            _ => None,
        }
    }
}

impl From<ArgumentLiteral> for Argument {
    fn from(arg: ArgumentLiteral) -> Self {
        Self::Literal(arg)
    }
}

impl From<ArgumentWord> for Argument {
    fn from(arg: ArgumentWord) -> Self {
        Self::Word(arg)
    }
}

impl From<ArgumentPhrase> for Argument {
    fn from(arg: ArgumentPhrase) -> Self {
        Self::Phrase(arg)
    }
}

impl From<ArgumentBoolean> for Argument {
    fn from(arg: ArgumentBoolean) -> Self {
        Self::Boolean(arg)
    }
}

impl From<ArgumentInteger> for Argument {
    fn from(arg: ArgumentInteger) -> Self {
        Self::Integer(arg)
    }
}
