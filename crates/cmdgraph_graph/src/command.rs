//! Command definitions.
//!
//! A command is a name, optional aliases, and a list of syntaxes. Each
//! syntax is one ordered argument path that may follow the name.

use std::collections::HashSet;

use cmdgraph_arguments::{Argument, SEPARATOR, TokenSpan};
use cmdgraph_foundation::ConfigurationError;

/// One argument path of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syntax {
    /// Arguments in the order they are typed.
    pub arguments: Vec<Argument>,
}

/// A validated command definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    runnable_without_args: bool,
    syntaxes: Vec<Syntax>,
}

impl Command {
    /// Starts building a command with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            aliases: Vec::new(),
            runnable_without_args: false,
            syntaxes: Vec::new(),
        }
    }

    /// The primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names, declared as redirects to the primary name.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the bare command name is a complete command.
    #[must_use]
    pub fn runnable_without_args(&self) -> bool {
        self.runnable_without_args
    }

    /// The declared syntaxes, in declaration order.
    #[must_use]
    pub fn syntaxes(&self) -> &[Syntax] {
        &self.syntaxes
    }
}

/// Builder for [`Command`]. Validation happens in [`CommandBuilder::build`].
#[derive(Clone, Debug)]
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    runnable_without_args: bool,
    syntaxes: Vec<Syntax>,
}

impl CommandBuilder {
    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Marks the bare command name as runnable.
    #[must_use]
    pub fn runnable(mut self) -> Self {
        self.runnable_without_args = true;
        self
    }

    /// Adds a syntax. An empty argument list marks the command runnable.
    #[must_use]
    pub fn syntax(mut self, arguments: Vec<Argument>) -> Self {
        if arguments.is_empty() {
            self.runnable_without_args = true;
        } else {
            self.syntaxes.push(Syntax { arguments });
        }
        self
    }

    /// Validates and builds the command.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a name or alias is empty or
    /// contains the separator, if one syntax repeats an argument id, or if a
    /// greedy phrase is followed by further arguments.
    pub fn build(self) -> Result<Command, ConfigurationError> {
        validate_name(&self.name)?;
        for alias in &self.aliases {
            validate_name(alias)?;
        }

        for syntax in &self.syntaxes {
            let mut seen = HashSet::new();
            let last = syntax.arguments.len() - 1;
            for (i, argument) in syntax.arguments.iter().enumerate() {
                if argument.id().is_empty() || argument.id().contains(SEPARATOR) {
                    return Err(ConfigurationError::InvalidName(argument.id().to_string()));
                }
                if !seen.insert(argument.id()) {
                    return Err(ConfigurationError::DuplicateArgumentId(
                        argument.id().to_string(),
                    ));
                }
                if i < last && is_greedy(argument) {
                    return Err(ConfigurationError::GreedyNotLast(argument.id().to_string()));
                }
            }
        }

        Ok(Command {
            name: self.name,
            aliases: self.aliases,
            runnable_without_args: self.runnable_without_args,
            syntaxes: self.syntaxes,
        })
    }
}

fn validate_name(name: &str) -> Result<(), ConfigurationError> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(ConfigurationError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn is_greedy(argument: &Argument) -> bool {
    argument.token_span() == TokenSpan::Rest
}
