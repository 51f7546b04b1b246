//! The published command graph.
//!
//! A [`CommandGraph`] is an immutable snapshot: nodes live in an arena and
//! reference each other by [`NodeId`], so a shared prefix is literally the
//! same node. The snapshot also keeps the commands it was built from, so the
//! dispatcher validates input against exactly the grammar that was declared.

use std::fmt;
use std::sync::Arc;

use cmdgraph_arguments::{NodeType, ParserSpec};

use crate::command::Command;

/// Index of a node within one [`CommandGraph`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of every graph.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One entry in the declared graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Root, literal, or argument.
    pub node_type: NodeType,
    /// Whether a command may terminate here.
    pub executable: bool,
    /// Name; `None` only for the root.
    pub name: Option<String>,
    /// Parser hint. Literal nodes expanded from a restricted word keep it
    /// for deduplication, but only argument nodes put it on the wire.
    pub parser: Option<ParserSpec>,
    /// Suggestions provider for argument nodes.
    pub suggestions: Option<String>,
    /// Restriction list a literal was expanded from.
    pub restrictions: Option<Arc<[String]>>,
    /// Node this one redirects to (command aliases).
    pub redirect: Option<NodeId>,
    /// Child nodes, in insertion order.
    pub children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            node_type: NodeType::Root,
            executable: false,
            name: None,
            parser: None,
            suggestions: None,
            restrictions: None,
            redirect: None,
            children: Vec::new(),
        }
    }

    /// Returns the name, or `""` for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Returns the parser identifier, if any.
    #[must_use]
    pub fn parser_identifier(&self) -> Option<&str> {
        self.parser.as_ref().map(|p| p.identifier)
    }
}

/// The top-level nodes contributed by one command: its own literal first,
/// then one redirect literal per alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandGroup {
    /// The command's primary name.
    pub command: String,
    /// Root children owned by the command.
    pub roots: Vec<NodeId>,
}

/// An immutable, deduplicated command graph.
#[derive(Clone, Debug)]
pub struct CommandGraph {
    pub(crate) generation: u64,
    pub(crate) nodes: Vec<Node>,
    pub(crate) groups: Vec<CommandGroup>,
    pub(crate) commands: im::Vector<Arc<Command>>,
    pub(crate) case_insensitive_commands: bool,
}

impl CommandGraph {
    /// An empty graph holding only the root.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            generation: 0,
            nodes: vec![Node::root()],
            groups: Vec::new(),
            commands: im::Vector::new(),
            case_insensitive_commands: true,
        }
    }

    /// Rebuild counter of the registry that published this snapshot.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no command has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Gets a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different graph and is out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Gets a node by id, returning `None` if out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Children of a node with the given name.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.node(*child).name() == name)
    }

    /// Iterates over all nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        // The builder never hands out more ids than fit in a u32
        (0..).map(NodeId).zip(self.nodes.iter())
    }

    /// Per-command top-level nodes, in registration order.
    #[must_use]
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// The commands this graph was built from, in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().map(|cmd| &**cmd)
    }

    /// Finds a command by name or alias.
    #[must_use]
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands().find(|cmd| {
            cmd.names().any(|n| {
                if self.case_insensitive_commands {
                    n.eq_ignore_ascii_case(name)
                } else {
                    n == name
                }
            })
        })
    }
}

impl Default for CommandGraph {
    fn default() -> Self {
        Self::empty()
    }
}
