//! Node tree building.
//!
//! Walks each command's argument paths and links the nodes the arguments
//! contribute, deduplicating shared prefixes into a DAG. A node is reused
//! when its parent, type, name, parser, and restriction list all match and
//! it has the same executable flag. Nodes differing only in executability
//! stay separate, since that bit is visible to the client.
//!
//! The builder is a configuration-phase tool: it takes `&mut self` and is
//! consumed by [`GraphBuilder::build`], so a published graph is never
//! touched again. A builder that returned an error is left half-filled and
//! should be dropped.

use std::collections::HashMap;
use std::sync::Arc;

use cmdgraph_arguments::{NodeSpec, NodeType, ParserSpec};
use cmdgraph_foundation::{Error, Result};
use tracing::debug;

use crate::command::Command;
use crate::graph::{CommandGraph, CommandGroup, Node, NodeId};

/// Most nodes a graph may hold; node indices are signed 32-bit on the wire.
pub const MAX_NODES: usize = i32::MAX as usize;

/// Everything that decides whether two nodes are the same node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct NodeKey {
    parent: NodeId,
    node_type: NodeType,
    name: String,
    parser: Option<ParserSpec>,
    restrictions: Option<Arc<[String]>>,
    executable: bool,
}

/// Incrementally builds a [`CommandGraph`].
#[derive(Debug)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<NodeKey, NodeId>,
    groups: Vec<CommandGroup>,
    commands: im::Vector<Arc<Command>>,
    case_insensitive_commands: bool,
    node_limit: usize,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a builder holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            index: HashMap::new(),
            groups: Vec::new(),
            commands: im::Vector::new(),
            case_insensitive_commands: true,
            node_limit: MAX_NODES,
        }
    }

    /// Sets whether the built graph matches command names case-insensitively.
    #[must_use]
    pub fn case_insensitive_commands(mut self, enabled: bool) -> Self {
        self.case_insensitive_commands = enabled;
        self
    }

    /// Caps the node count, root included. Clamped to [`MAX_NODES`].
    #[must_use]
    pub fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit.min(MAX_NODES);
        self
    }

    /// Adds one command's literal, aliases, and every syntax path.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the graph would outgrow its node limit.
    pub fn add_command(&mut self, command: Arc<Command>) -> Result<()> {
        let main = self.child(
            NodeId::ROOT,
            &NodeSpec::literal(command.name(), command.runnable_without_args()),
        )?;

        for syntax in command.syntaxes() {
            let mut current = vec![main];
            let last = syntax.arguments.len().saturating_sub(1);

            for (i, argument) in syntax.arguments.iter().enumerate() {
                let specs = argument.contribute_nodes(i == last);
                let mut next = Vec::with_capacity(current.len() * specs.len());
                // A restricted word fans out into several literals, and the
                // following argument hangs off each of them
                for &parent in &current {
                    for spec in &specs {
                        let id = self.child(parent, spec)?;
                        if !next.contains(&id) {
                            next.push(id);
                        }
                    }
                }
                current = next;
            }
        }

        let mut roots = vec![main];
        for alias in command.aliases() {
            let spec = NodeSpec::literal(alias.clone(), command.runnable_without_args());
            let id = self.child(NodeId::ROOT, &spec)?;
            self.nodes[id.index()].redirect = Some(main);
            roots.push(id);
        }

        self.groups.push(CommandGroup {
            command: command.name().to_string(),
            roots,
        });
        self.commands.push_back(command);
        Ok(())
    }

    /// Finishes the graph.
    #[must_use]
    pub fn build(self, generation: u64) -> CommandGraph {
        debug!(
            generation,
            nodes = self.nodes.len(),
            commands = self.commands.len(),
            "built command graph"
        );
        CommandGraph {
            generation,
            nodes: self.nodes,
            groups: self.groups,
            commands: self.commands,
            case_insensitive_commands: self.case_insensitive_commands,
        }
    }

    /// Returns the child of `parent` matching `spec`, creating it if needed.
    fn child(&mut self, parent: NodeId, spec: &NodeSpec) -> Result<NodeId> {
        let key = NodeKey {
            parent,
            node_type: spec.node_type,
            name: spec.name.clone(),
            parser: spec.parser.clone(),
            restrictions: spec.restrictions.clone(),
            executable: spec.executable,
        };
        if let Some(&id) = self.index.get(&key) {
            return Ok(id);
        }

        if self.nodes.len() >= self.node_limit {
            return Err(Error::internal(format!(
                "command graph exceeds {} nodes",
                self.node_limit
            )));
        }
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| Error::internal("node index out of range"))?;
        self.nodes.push(Node {
            node_type: spec.node_type,
            executable: spec.executable,
            name: Some(spec.name.clone()),
            parser: spec.parser.clone(),
            suggestions: spec.suggestions.clone(),
            restrictions: spec.restrictions.clone(),
            redirect: None,
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        self.index.insert(key, id);
        Ok(id)
    }
}
