//! Bounded integer arguments.

use cmdgraph_foundation::{ConfigurationError, ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::argument::{ArgumentType, TokenSpan};
use crate::node::{NodeSpec, ParserSpec};

/// A 32-bit integer with optional inclusive bounds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArgumentInteger {
    id: String,
    min: Option<i32>,
    max: Option<i32>,
}

impl ArgumentInteger {
    /// The token is not a decimal integer.
    pub const NOT_NUMBER: ErrorCode = 1;
    /// The value is below the minimum.
    pub const TOO_LOW: ErrorCode = 2;
    /// The value is above the maximum.
    pub const TOO_HIGH: ErrorCode = 3;

    /// Creates an unbounded integer argument.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min: None,
            max: None,
        }
    }

    /// Sets inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRange`] if `min > max`.
    pub fn between(mut self, min: i32, max: i32) -> Result<Self, ConfigurationError> {
        self.min = Some(min);
        self.max = Some(max);
        self.check_range()
    }

    /// Sets an inclusive lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRange`] if an upper bound is
    /// already set below `min`.
    pub fn at_least(mut self, min: i32) -> Result<Self, ConfigurationError> {
        self.min = Some(min);
        self.check_range()
    }

    /// Sets an inclusive upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRange`] if a lower bound is
    /// already set above `max`.
    pub fn at_most(mut self, max: i32) -> Result<Self, ConfigurationError> {
        self.max = Some(max);
        self.check_range()
    }

    fn check_range(self) -> Result<Self, ConfigurationError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(ConfigurationError::InvalidRange {
                argument: self.id,
                min,
                max,
            }),
            _ => Ok(self),
        }
    }

    fn error(message: String, input: &str, code: ErrorCode) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::Integer, message, input, code)
    }
}

impl ArgumentType for ArgumentInteger {
    type Output = i32;

    fn id(&self) -> &str {
        &self.id
    }

    fn token_span(&self) -> TokenSpan {
        TokenSpan::Single
    }

    fn parse(&self, input: &str) -> Result<i32, SyntaxError> {
        let value: i32 = input.parse().map_err(|_| {
            Self::error("Input is not a number".to_string(), input, Self::NOT_NUMBER)
        })?;

        if let Some(min) = self.min {
            if value < min {
                return Err(Self::error(
                    format!("Value must be at least {min}"),
                    input,
                    Self::TOO_LOW,
                ));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(Self::error(
                    format!("Value must be at most {max}"),
                    input,
                    Self::TOO_HIGH,
                ));
            }
        }
        Ok(value)
    }

    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        vec![NodeSpec::argument(
            self.id.clone(),
            ParserSpec::integer(self.min, self.max),
            executable,
        )]
    }
}
