//! Command graph serialization.
//!
//! Serialization runs in two passes. The first walks the graph breadth-first
//! from the root and assigns every reachable node an index (the root is
//! always 0), so any child or redirect index is resolvable no matter how the
//! commands were declared. The second pass writes the payload:
//!
//! ```text
//! VarInt node count
//! node record * count
//!     u8       flags        (bits 0-1 type, 2 executable, 3 redirect, 4 suggestions)
//!     VarInt   child count, then VarInt child indices
//!     VarInt   redirect index          if redirect bit
//!     String   name                    unless root
//!     String   parser identifier       argument nodes
//!     bytes    parser properties       argument nodes
//!     String   suggestions provider    if suggestions bit
//! VarInt root index
//! ```
//!
//! If the payload exceeds the configured bound, each command's share of the
//! payload is measured and commands are admitted in registration order; a
//! command that would push the payload past the bound is left out, and the
//! ones after it still get their chance. Each omission is logged and
//! reported. Serialization itself never fails because of size.

use std::collections::{HashMap, HashSet, VecDeque};

use cmdgraph_arguments::NodeType;
use cmdgraph_arguments::node::{BOOL_PARSER, INTEGER_PARSER, STRING_PARSER};
use cmdgraph_foundation::{
    Error, GraphConfig, Result, SerializationLimitError, WireBuffer, WireReader, var_int_len,
};
use tracing::warn;

use crate::graph::{CommandGraph, CommandGroup, NodeId};

/// Flag bit: a command may terminate at this node.
pub const FLAG_EXECUTABLE: u8 = 0x04;
/// Flag bit: a redirect index follows.
pub const FLAG_REDIRECT: u8 = 0x08;
/// Flag bit: a suggestions provider follows the parser properties.
pub const FLAG_SUGGESTIONS: u8 = 0x10;
/// Mask for the node type bits.
pub const TYPE_MASK: u8 = 0x03;

/// A serialized graph and what had to be left out of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializedGraph {
    /// The complete payload.
    pub bytes: Vec<u8>,
    /// Number of node records written.
    pub node_count: usize,
    /// Commands omitted to stay within the payload bound.
    pub dropped: Vec<SerializationLimitError>,
}

/// Index assignment for one serialization attempt.
struct Layout {
    order: Vec<NodeId>,
    indices: HashMap<NodeId, i32>,
}

impl Layout {
    fn position(&self, id: NodeId) -> Result<usize> {
        self.indices
            .get(&id)
            .and_then(|&index| usize::try_from(index).ok())
            .ok_or_else(|| Error::internal(format!("unindexed node {id:?}")))
    }
}

/// An encoded payload with the byte length of each record, in index order.
struct Encoded {
    bytes: Vec<u8>,
    record_lens: Vec<usize>,
}

/// Serializes a graph snapshot.
///
/// # Errors
///
/// Returns an error only if the graph is internally inconsistent. Exceeding
/// `config.max_payload_bytes` is handled by omission, see the module docs.
pub fn serialize(graph: &CommandGraph, config: &GraphConfig) -> Result<SerializedGraph> {
    let limit = config.max_payload_bytes;
    let layout = assign_indices(graph, &HashSet::new())?;
    let full = encode(graph, &layout, &HashSet::new())?;
    if full.bytes.len() <= limit {
        return Ok(SerializedGraph {
            node_count: layout.order.len(),
            bytes: full.bytes,
            dropped: Vec::new(),
        });
    }

    // Sizes measured against the full layout; indices only shrink once
    // groups are left out, so these never underestimate.
    let sizes = graph
        .groups()
        .iter()
        .map(|group| group_size(graph, group, &layout, &full.record_lens))
        .collect::<Result<Vec<_>>>()?;
    let mut projected = full.bytes.len().saturating_sub(sizes.iter().sum());

    let mut excluded: HashSet<NodeId> = HashSet::new();
    let mut dropped = Vec::new();
    for (group, size) in graph.groups().iter().zip(sizes) {
        if projected + size <= limit {
            projected += size;
            continue;
        }
        warn!(
            command = %group.command,
            size,
            bytes = projected + size,
            limit,
            "omitting command from declared graph"
        );
        dropped.push(SerializationLimitError {
            command: group.command.clone(),
            encoded_bytes: projected + size,
            limit,
        });
        excluded.extend(group.roots.iter().copied());
    }

    let layout = assign_indices(graph, &excluded)?;
    let bounded = encode(graph, &layout, &excluded)?;
    if bounded.bytes.len() > limit {
        warn!(
            bytes = bounded.bytes.len(),
            limit,
            "command graph exceeds payload bound with no commands left to omit"
        );
    }
    Ok(SerializedGraph {
        node_count: layout.order.len(),
        bytes: bounded.bytes,
        dropped,
    })
}

/// Bytes one command adds to the payload: the records of every node under
/// its top-level literals, plus their indices in the root's child list.
fn group_size(
    graph: &CommandGraph,
    group: &CommandGroup,
    layout: &Layout,
    record_lens: &[usize],
) -> Result<usize> {
    let mut size = 0;
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<NodeId> = group.roots.iter().copied().collect();

    for &root in &group.roots {
        size += var_int_len(layout.indices.get(&root).copied().unwrap_or_default());
    }
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        size += record_lens
            .get(layout.position(id)?)
            .copied()
            .ok_or_else(|| Error::internal(format!("no record for node {id:?}")))?;
        let node = graph
            .get(id)
            .ok_or_else(|| Error::internal(format!("dangling node reference {id:?}")))?;
        queue.extend(node.children.iter().copied());
        queue.extend(node.redirect);
    }
    Ok(size)
}

/// First pass: collect reachable nodes and number them.
fn assign_indices(graph: &CommandGraph, excluded: &HashSet<NodeId>) -> Result<Layout> {
    let mut order = Vec::with_capacity(graph.len());
    let mut indices = HashMap::with_capacity(graph.len());
    let mut queue = VecDeque::from([graph.root()]);

    while let Some(id) = queue.pop_front() {
        if indices.contains_key(&id) {
            continue;
        }
        let index = i32::try_from(order.len())
            .map_err(|_| Error::internal("too many nodes for one graph"))?;
        indices.insert(id, index);
        order.push(id);

        let node = graph
            .get(id)
            .ok_or_else(|| Error::internal(format!("dangling node reference {id:?}")))?;
        queue.extend(
            node.children
                .iter()
                .copied()
                .filter(|child| !excluded.contains(child)),
        );
        queue.extend(node.redirect);
    }

    Ok(Layout { order, indices })
}

/// Second pass: write every record in index order.
fn encode(graph: &CommandGraph, layout: &Layout, excluded: &HashSet<NodeId>) -> Result<Encoded> {
    let index_of = |id: NodeId| {
        layout
            .indices
            .get(&id)
            .copied()
            .ok_or_else(|| Error::internal(format!("unindexed node {id:?}")))
    };

    let mut buf = WireBuffer::with_capacity(graph.len() * 16);
    let mut record_lens = Vec::with_capacity(layout.order.len());
    buf.write_len(layout.order.len())?;

    for &id in &layout.order {
        let start = buf.len();
        let node = graph.node(id);
        let has_suggestions = node.node_type == NodeType::Argument && node.suggestions.is_some();

        let mut flags = node.node_type.tag() & TYPE_MASK;
        if node.executable {
            flags |= FLAG_EXECUTABLE;
        }
        if node.redirect.is_some() {
            flags |= FLAG_REDIRECT;
        }
        if has_suggestions {
            flags |= FLAG_SUGGESTIONS;
        }
        buf.write_u8(flags);

        let children: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|child| !excluded.contains(child))
            .collect();
        buf.write_len(children.len())?;
        for child in children {
            buf.write_var_int(index_of(child)?);
        }

        if let Some(redirect) = node.redirect {
            buf.write_var_int(index_of(redirect)?);
        }

        if node.node_type != NodeType::Root {
            buf.write_string(node.name())?;
        }

        if node.node_type == NodeType::Argument {
            let parser = node.parser.as_ref().ok_or_else(|| {
                Error::internal(format!("argument node '{}' has no parser", node.name()))
            })?;
            buf.write_string(parser.identifier)?;
            buf.write_bytes(&parser.properties);
            if let Some(suggestions) = node.suggestions.as_deref() {
                buf.write_string(suggestions)?;
            }
        }
        record_lens.push(buf.len() - start);
    }

    buf.write_var_int(index_of(graph.root())?);
    Ok(Encoded {
        bytes: buf.into_bytes(),
        record_lens,
    })
}

/// A node record read back from a serialized graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedNode {
    /// Node type from the flag bits.
    pub node_type: NodeType,
    /// Executable bit.
    pub executable: bool,
    /// Child indices.
    pub children: Vec<usize>,
    /// Redirect index.
    pub redirect: Option<usize>,
    /// Name, absent for the root.
    pub name: Option<String>,
    /// Parser identifier, argument nodes only.
    pub parser: Option<String>,
    /// Raw parser properties.
    pub properties: Vec<u8>,
    /// Suggestions provider.
    pub suggestions: Option<String>,
}

/// A serialized graph read back into records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedGraph {
    /// Records in index order.
    pub nodes: Vec<DecodedNode>,
    /// Index of the root record.
    pub root: usize,
}

impl DecodedGraph {
    /// Children of the record at `index`.
    #[must_use]
    pub fn children(&self, index: usize) -> Vec<&DecodedNode> {
        self.nodes
            .get(index)
            .map(|n| n.children.iter().filter_map(|&c| self.nodes.get(c)).collect())
            .unwrap_or_default()
    }
}

/// Decodes a payload produced by [`serialize`].
///
/// # Errors
///
/// Returns an error on truncated input, unknown node types, unknown parser
/// identifiers, or out-of-range indices.
pub fn decode(bytes: &[u8]) -> Result<DecodedGraph> {
    let mut reader = WireReader::new(bytes);
    let count = reader.read_len()?;
    let mut nodes = Vec::with_capacity(count.min(4096));

    for _ in 0..count {
        let flags = reader.read_u8()?;
        let node_type = NodeType::from_tag(flags & TYPE_MASK)
            .ok_or_else(|| Error::malformed(format!("unknown node type in flags {flags:#04x}")))?;

        let child_count = reader.read_len()?;
        let children = (0..child_count)
            .map(|_| reader.read_len())
            .collect::<Result<Vec<_>>>()?;

        let redirect = if flags & FLAG_REDIRECT != 0 {
            Some(reader.read_len()?)
        } else {
            None
        };

        let name = if node_type == NodeType::Root {
            None
        } else {
            Some(reader.read_string()?)
        };

        let (parser, properties, suggestions) = if node_type == NodeType::Argument {
            let identifier = reader.read_string()?;
            let properties = read_properties(&mut reader, &identifier)?;
            let suggestions = if flags & FLAG_SUGGESTIONS != 0 {
                Some(reader.read_string()?)
            } else {
                None
            };
            (Some(identifier), properties, suggestions)
        } else {
            (None, Vec::new(), None)
        };

        nodes.push(DecodedNode {
            node_type,
            executable: flags & FLAG_EXECUTABLE != 0,
            children,
            redirect,
            name,
            parser,
            properties,
            suggestions,
        });
    }

    let root = reader.read_len()?;
    if reader.remaining() != 0 {
        return Err(Error::malformed(format!(
            "{} trailing bytes after graph",
            reader.remaining()
        )));
    }

    let in_range = |i: &usize| *i < nodes.len();
    if !in_range(&root)
        || nodes
            .iter()
            .any(|n| !n.children.iter().all(in_range) || !n.redirect.iter().all(in_range))
    {
        return Err(Error::malformed("node index out of range"));
    }

    Ok(DecodedGraph { nodes, root })
}

/// Properties are opaque on the wire; their length is known per parser.
fn read_properties(reader: &mut WireReader<'_>, identifier: &str) -> Result<Vec<u8>> {
    let mut out = WireBuffer::new();
    match identifier {
        STRING_PARSER => out.write_var_int(reader.read_var_int()?),
        BOOL_PARSER => {}
        INTEGER_PARSER => {
            let flags = reader.read_u8()?;
            out.write_u8(flags);
            if flags & 0x01 != 0 {
                out.write_i32(reader.read_i32()?);
            }
            if flags & 0x02 != 0 {
                out.write_i32(reader.read_i32()?);
            }
        }
        other => return Err(Error::malformed(format!("unknown parser '{other}'"))),
    }
    Ok(out.into_bytes())
}
