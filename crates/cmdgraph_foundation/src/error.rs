//! Error types for the cmdgraph system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Three families of failure exist and each is isolated differently:
//!
//! - [`SyntaxError`] - a single token failed an argument's parse rule. Expected
//!   and recoverable; the dispatcher backtracks to the next alternative.
//! - [`ConfigurationError`] - an argument or command was set up incorrectly.
//!   Raised at registration time and rejects only that one command.
//! - [`SerializationLimitError`] - the declared graph would exceed the client
//!   payload bound. The offending command subgraph is omitted and logged.

use std::fmt;

use thiserror::Error;

/// Result alias for fallible cmdgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error code attached to a [`SyntaxError`].
///
/// Codes are scoped per argument family, so `1` for a word argument and `1`
/// for an integer argument mean different things. Pair with
/// [`SyntaxError::kind`] to interpret.
pub type ErrorCode = u32;

/// The main error type for cmdgraph operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an error for malformed wire data.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Malformed(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the syntax error, if this is one.
    #[must_use]
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match &self.kind {
            ErrorKind::Syntax(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the configuration error, if this is one.
    #[must_use]
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match &self.kind {
            ErrorKind::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Self::new(ErrorKind::Syntax(err))
    }
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Self::new(ErrorKind::Configuration(err))
    }
}

impl From<SerializationLimitError> for Error {
    fn from(err: SerializationLimitError) -> Self {
        Self::new(ErrorKind::SerializationLimit(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A token failed to parse.
    #[error(transparent)]
    Syntax(SyntaxError),

    /// An argument or command was configured incorrectly.
    #[error(transparent)]
    Configuration(ConfigurationError),

    /// The declared graph exceeded the payload bound.
    #[error(transparent)]
    SerializationLimit(SerializationLimitError),

    /// Wire data could not be decoded.
    #[error("malformed wire data: {0}")]
    Malformed(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The argument family that raised a [`SyntaxError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxErrorKind {
    /// A fixed literal word.
    Literal,
    /// A single word, optionally restricted.
    Word,
    /// A quotable or greedy phrase.
    Phrase,
    /// A boolean.
    Boolean,
    /// A bounded integer.
    Integer,
    /// The command line as a whole (unknown command, trailing input).
    Command,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Literal => "literal",
            Self::Word => "word",
            Self::Phrase => "phrase",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Command => "command",
        };
        f.write_str(name)
    }
}

/// A token was rejected by an argument's parse rule.
///
/// Never a server fault: the dispatcher treats it as "this alternative does
/// not match".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}: '{token}' ({kind} error {code})")]
pub struct SyntaxError {
    /// Which argument family rejected the token.
    pub kind: SyntaxErrorKind,
    /// The offending input, verbatim.
    pub token: String,
    /// Family-scoped error code.
    pub code: ErrorCode,
    /// Human readable description.
    pub message: String,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(
        kind: SyntaxErrorKind,
        message: impl Into<String>,
        token: impl Into<String>,
        code: ErrorCode,
    ) -> Self {
        Self {
            kind,
            token: token.into(),
            code,
            message: message.into(),
        }
    }

    /// Returns true if this error has the given kind and code.
    #[must_use]
    pub fn is(&self, kind: SyntaxErrorKind, code: ErrorCode) -> bool {
        self.kind == kind && self.code == code
    }
}

/// An argument or command was set up incorrectly.
///
/// Raised immediately at configuration time, never deferred to parse time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A restriction list contained an empty entry.
    #[error("argument '{argument}' has an empty restriction at index {index}")]
    EmptyRestriction {
        /// The argument identifier.
        argument: String,
        /// Position of the empty entry.
        index: usize,
    },

    /// A restriction could never match because it contains the separator.
    #[error("argument '{argument}' restriction '{restriction}' contains a space")]
    RestrictionContainsSeparator {
        /// The argument identifier.
        argument: String,
        /// The offending restriction.
        restriction: String,
    },

    /// A command, alias, or argument name was empty or contained a space.
    #[error("invalid name '{0}'")]
    InvalidName(String),

    /// An integer argument was given `min > max`.
    #[error("argument '{argument}' has an empty range {min}..={max}")]
    InvalidRange {
        /// The argument identifier.
        argument: String,
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },

    /// Two arguments in one syntax share an identifier.
    #[error("duplicate argument id '{0}' in one syntax")]
    DuplicateArgumentId(String),

    /// A greedy argument was followed by further arguments.
    #[error("greedy argument '{0}' must be the last argument of its syntax")]
    GreedyNotLast(String),

    /// A command name or alias is already registered.
    #[error("command name '{0}' is already registered")]
    DuplicateCommand(String),
}

impl ConfigurationError {
    /// The argument this error is about, if it names one.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::EmptyRestriction { argument, .. }
            | Self::RestrictionContainsSeparator { argument, .. }
            | Self::InvalidRange { argument, .. } => Some(argument),
            Self::DuplicateArgumentId(argument) | Self::GreedyNotLast(argument) => Some(argument),
            Self::InvalidName(_) | Self::DuplicateCommand(_) => None,
        }
    }
}

/// The declared graph would exceed the client payload bound.
///
/// Handled by omitting the offending command's subgraph; never aborts the
/// connection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("command '{command}' omitted: payload would be {encoded_bytes} bytes, limit is {limit}")]
pub struct SerializationLimitError {
    /// The command whose subgraph was omitted.
    pub command: String,
    /// Size the payload would have had with the command included.
    pub encoded_bytes: usize,
    /// The configured limit.
    pub limit: usize,
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Command being registered or parsed.
    pub command: Option<String>,
    /// Argument within the command.
    pub argument: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets the argument identifier.
    #[must_use]
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(command) = &self.command {
            write!(f, "in command '{command}'")?;
            if let Some(argument) = &self.argument {
                write!(f, " at argument '{argument}'")?;
            }
        } else if let Some(argument) = &self.argument {
            write!(f, "at argument '{argument}'")?;
        }
        Ok(())
    }
}
