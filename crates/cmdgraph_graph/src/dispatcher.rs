//! Server-side validation of raw command lines.
//!
//! The dispatcher resolves the command name against a graph snapshot, then
//! tries each syntax in declaration order. A [`SyntaxError`] from an argument
//! only means "this alternative does not match": the dispatcher moves on to
//! the next syntax. If none match, the error from the syntax that got
//! furthest is reported.

use std::collections::HashMap;

use cmdgraph_arguments::{ArgumentValue, TokenCursor, TokenSpan};
use cmdgraph_foundation::{ErrorCode, SyntaxError, SyntaxErrorKind};

use crate::command::{Command, Syntax};
use crate::graph::CommandGraph;

/// A command line that matched one of the declared syntaxes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Primary name of the matched command, even if an alias was typed.
    pub command: String,
    /// Index of the matching syntax; `None` for a bare runnable command.
    pub syntax: Option<usize>,
    /// Parsed values by argument id.
    pub values: HashMap<String, ArgumentValue>,
}

impl ParsedCommand {
    /// Gets a parsed value by argument id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ArgumentValue> {
        self.values.get(id)
    }
}

/// A syntax attempt that failed after consuming `progress` arguments.
struct Attempt {
    progress: usize,
    error: SyntaxError,
}

/// Validates command lines against a [`CommandGraph`] snapshot.
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Nothing but whitespace was typed.
    pub const EMPTY_INPUT: ErrorCode = 1;
    /// No command has that name or alias.
    pub const UNKNOWN_COMMAND: ErrorCode = 2;
    /// Input remained after a syntax was fully matched.
    pub const TRAILING_INPUT: ErrorCode = 3;
    /// The line ended before a required argument.
    pub const MISSING_ARGUMENT: ErrorCode = 4;

    /// Parses a command line. A leading `/` is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if no syntax of the named command accepts
    /// the rest of the line.
    pub fn parse(graph: &CommandGraph, input: &str) -> Result<ParsedCommand, SyntaxError> {
        let line = input.strip_prefix('/').unwrap_or(input);
        let mut cursor = TokenCursor::new(line);

        let name = match cursor.take(TokenSpan::Single) {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(Self::error("Empty command", input, Self::EMPTY_INPUT));
            }
        };

        let command = graph
            .find_command(name)
            .ok_or_else(|| Self::error("Unknown command", name, Self::UNKNOWN_COMMAND))?;

        if cursor.is_done() {
            if command.runnable_without_args() {
                return Ok(ParsedCommand {
                    command: command.name().to_string(),
                    syntax: None,
                    values: HashMap::new(),
                });
            }
            return Err(Self::error("Missing arguments", input, Self::MISSING_ARGUMENT));
        }

        Self::match_syntaxes(command, &cursor)
    }

    fn match_syntaxes(
        command: &Command,
        cursor: &TokenCursor<'_>,
    ) -> Result<ParsedCommand, SyntaxError> {
        let mut best: Option<Attempt> = None;

        for (index, syntax) in command.syntaxes().iter().enumerate() {
            match Self::try_syntax(syntax, cursor.clone()) {
                Ok(values) => {
                    return Ok(ParsedCommand {
                        command: command.name().to_string(),
                        syntax: Some(index),
                        values,
                    });
                }
                Err(attempt) => {
                    if best.as_ref().is_none_or(|b| attempt.progress > b.progress) {
                        best = Some(attempt);
                    }
                }
            }
        }

        Err(best.map_or_else(
            || {
                Self::error(
                    "Command takes no arguments",
                    cursor.remaining(),
                    Self::TRAILING_INPUT,
                )
            },
            |b| b.error,
        ))
    }

    fn try_syntax(
        syntax: &Syntax,
        mut cursor: TokenCursor<'_>,
    ) -> Result<HashMap<String, ArgumentValue>, Attempt> {
        let mut values = HashMap::with_capacity(syntax.arguments.len());

        for (progress, argument) in syntax.arguments.iter().enumerate() {
            let Some(raw) = cursor.take(argument.token_span()) else {
                return Err(Attempt {
                    progress,
                    error: Self::error(
                        &format!("Missing argument '{}'", argument.id()),
                        "",
                        Self::MISSING_ARGUMENT,
                    ),
                });
            };
            let value = argument
                .parse(raw)
                .map_err(|error| Attempt { progress, error })?;
            values.insert(argument.id().to_string(), value);
        }

        if !cursor.is_done() {
            return Err(Attempt {
                progress: syntax.arguments.len(),
                error: Self::error(
                    "Unexpected trailing input",
                    cursor.remaining(),
                    Self::TRAILING_INPUT,
                ),
            });
        }
        Ok(values)
    }

    fn error(message: &str, token: &str, code: ErrorCode) -> SyntaxError {
        SyntaxError::new(SyntaxErrorKind::Command, message, token, code)
    }
}
