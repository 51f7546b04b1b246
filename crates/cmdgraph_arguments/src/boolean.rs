//! Boolean arguments.

use cmdgraph_foundation::{ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::argument::{ArgumentType, TokenSpan};
use crate::node::{NodeSpec, ParserSpec};
use crate::tokenizer::eq_ignore_case;

/// `true` or `false`, case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArgumentBoolean {
    id: String,
}

impl ArgumentBoolean {
    /// The token was neither `true` nor `false`.
    pub const NOT_BOOLEAN: ErrorCode = 1;

    /// Creates a boolean argument.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl ArgumentType for ArgumentBoolean {
    type Output = bool;

    fn id(&self) -> &str {
        &self.id
    }

    fn token_span(&self) -> TokenSpan {
        TokenSpan::Single
    }

    fn parse(&self, input: &str) -> Result<bool, SyntaxError> {
        if eq_ignore_case(input, "true") {
            Ok(true)
        } else if eq_ignore_case(input, "false") {
            Ok(false)
        } else {
            Err(SyntaxError::new(
                SyntaxErrorKind::Boolean,
                "Not a boolean",
                input,
                Self::NOT_BOOLEAN,
            ))
        }
    }

    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        vec![NodeSpec::argument(
            self.id.clone(),
            ParserSpec::boolean(),
            executable,
        )]
    }
}
