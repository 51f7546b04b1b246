//! Fixed literal words.

use cmdgraph_foundation::{ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::argument::{ArgumentType, TokenSpan};
use crate::node::NodeSpec;

/// A fixed word that must appear verbatim, such as a subcommand name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArgumentLiteral {
    id: String,
}

impl ArgumentLiteral {
    /// The token was not the literal.
    pub const LITERAL_MISMATCH: ErrorCode = 1;

    /// Creates a literal matching `word`.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self { id: word.into() }
    }
}

impl ArgumentType for ArgumentLiteral {
    type Output = String;

    fn id(&self) -> &str {
        &self.id
    }

    fn token_span(&self) -> TokenSpan {
        TokenSpan::Single
    }

    fn parse(&self, input: &str) -> Result<String, SyntaxError> {
        if input == self.id {
            Ok(input.to_string())
        } else {
            Err(SyntaxError::new(
                SyntaxErrorKind::Literal,
                format!("Expected literal '{}'", self.id),
                input,
                Self::LITERAL_MISMATCH,
            ))
        }
    }

    fn contribute_nodes(&self, executable: bool) -> Vec<NodeSpec> {
        vec![NodeSpec::literal(self.id.clone(), executable)]
    }
}
