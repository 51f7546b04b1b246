//! Versioned command registry.
//!
//! The registry is the single writer. Every change rebuilds the graph from
//! scratch and publishes it as a new `Arc<CommandGraph>`; readers keep
//! whatever snapshot they took, so a rebuild never disturbs a serialization
//! or dispatch already in flight.

use std::sync::Arc;

use cmdgraph_foundation::{ConfigurationError, Error, ErrorContext, GraphConfig, Result};
use tracing::{debug, warn};

use crate::builder::GraphBuilder;
use crate::command::Command;
use crate::graph::CommandGraph;
use crate::serializer::{SerializedGraph, serialize};

/// Owns registered commands and the current published graph.
#[derive(Debug)]
pub struct CommandRegistry {
    config: GraphConfig,
    commands: im::Vector<Arc<Command>>,
    current: Arc<CommandGraph>,
    generation: u64,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: GraphConfig) -> Self {
        let current = GraphBuilder::new()
            .case_insensitive_commands(config.case_insensitive_commands)
            .build(1);
        Self {
            config,
            commands: im::Vector::new(),
            current: Arc::new(current),
            generation: 1,
        }
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Generation of the current snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current published graph.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CommandGraph> {
        Arc::clone(&self.current)
    }

    /// Registers a command and publishes a new graph.
    ///
    /// A rejected command leaves the registry and the published graph
    /// exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateCommand`] if the command's
    /// name or one of its aliases is already taken, or an internal error if
    /// the graph would outgrow its node limit.
    pub fn register(&mut self, command: Command) -> Result<Arc<CommandGraph>> {
        if let Some(taken) = command.names().find(|name| self.is_taken(name)) {
            let err = Error::from(ConfigurationError::DuplicateCommand(taken.to_string()))
                .with_context(ErrorContext::new().with_command(command.name()));
            warn!(command = command.name(), error = %err, "rejected command registration");
            return Err(err);
        }
        if let Some(dup) = duplicate_within(&command, self.config.case_insensitive_commands) {
            let err = Error::from(ConfigurationError::DuplicateCommand(dup))
                .with_context(ErrorContext::new().with_command(command.name()));
            warn!(command = command.name(), error = %err, "rejected command registration");
            return Err(err);
        }

        self.warn_large_restrictions(&command);
        let name = command.name().to_string();
        let mut commands = self.commands.clone();
        commands.push_back(Arc::new(command));
        let graph = self.publish(commands)?;
        debug!(command = %name, "registered command");
        Ok(graph)
    }

    /// Builds and registers a command in one step.
    ///
    /// # Errors
    ///
    /// Returns the builder's [`ConfigurationError`] or a duplicate-name error.
    pub fn register_with(
        &mut self,
        build: impl FnOnce() -> std::result::Result<Command, ConfigurationError>,
    ) -> Result<Arc<CommandGraph>> {
        let command = build().map_err(|e| {
            warn!(error = %e, "rejected command registration");
            let context = match e.argument() {
                Some(argument) => ErrorContext::new().with_argument(argument),
                None => ErrorContext::new(),
            };
            Error::from(e).with_context(context)
        })?;
        self.register(command)
    }

    /// Removes a command by primary name. Returns the new graph if one was
    /// removed.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::rebuild`].
    pub fn unregister(&mut self, name: &str) -> Result<Option<Arc<CommandGraph>>> {
        let Some(position) = self
            .commands
            .iter()
            .position(|cmd| self.names_match(cmd.name(), name))
        else {
            return Ok(None);
        };
        let mut commands = self.commands.clone();
        commands.remove(position);
        let graph = self.publish(commands)?;
        debug!(command = name, "unregistered command");
        Ok(Some(graph))
    }

    /// Serializes the current snapshot.
    ///
    /// # Errors
    ///
    /// See [`serialize`].
    pub fn serialize(&self) -> Result<SerializedGraph> {
        serialize(&self.current, &self.config)
    }

    /// Rebuilds the graph from the registered commands and publishes it.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the graph outgrows its node limit; the
    /// previous snapshot stays published.
    pub fn rebuild(&mut self) -> Result<Arc<CommandGraph>> {
        let commands = self.commands.clone();
        self.publish(commands)
    }

    /// Builds a graph from `commands` and, only if that succeeds, makes them
    /// the registered set and publishes the graph.
    fn publish(&mut self, commands: im::Vector<Arc<Command>>) -> Result<Arc<CommandGraph>> {
        let generation = self.generation + 1;
        let mut builder =
            GraphBuilder::new().case_insensitive_commands(self.config.case_insensitive_commands);
        for command in &commands {
            builder.add_command(Arc::clone(command)).map_err(|e| {
                warn!(command = command.name(), error = %e, "graph rebuild failed");
                e
            })?;
        }
        self.commands = commands;
        self.generation = generation;
        self.current = Arc::new(builder.build(generation));
        Ok(self.snapshot())
    }

    fn names_match(&self, a: &str, b: &str) -> bool {
        if self.config.case_insensitive_commands {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }

    fn is_taken(&self, name: &str) -> bool {
        self.commands
            .iter()
            .any(|cmd| cmd.names().any(|n| self.names_match(n, name)))
    }

    fn warn_large_restrictions(&self, command: &Command) {
        for syntax in command.syntaxes() {
            for argument in &syntax.arguments {
                if let Some(count) = argument.restriction_count() {
                    if count > self.config.max_restrictions {
                        warn!(
                            command = command.name(),
                            argument = argument.id(),
                            count,
                            limit = self.config.max_restrictions,
                            "restriction list expands into many sibling nodes"
                        );
                    }
                }
            }
        }
    }
}

/// Returns a name that appears twice among a command's own name and aliases.
fn duplicate_within(command: &Command, case_insensitive: bool) -> Option<String> {
    let names: Vec<&str> = command.names().collect();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            let same = if case_insensitive {
                a.eq_ignore_ascii_case(b)
            } else {
                a == b
            };
            if same {
                return Some((*b).to_string());
            }
        }
    }
    None
}
