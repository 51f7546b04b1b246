//! Node contributions.
//!
//! An argument does not build graph nodes itself. It describes the nodes it
//! needs as [`NodeSpec`]s and the graph builder links and deduplicates them.

use std::fmt;
use std::sync::Arc;

use cmdgraph_foundation::WireBuffer;

/// Declared node type, stored in bits 0-1 of the node flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    /// The single graph root.
    Root = 0,
    /// A fixed word.
    Literal = 1,
    /// A typed argument with a client-side parser.
    Argument = 2,
}

impl NodeType {
    /// Returns the two-bit wire tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Decodes a two-bit wire tag.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Root),
            1 => Some(Self::Literal),
            2 => Some(Self::Argument),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Literal => f.write_str("literal"),
            Self::Argument => f.write_str("argument"),
        }
    }
}

/// Parser identifier for the string family.
pub const STRING_PARSER: &str = "brigadier:string";
/// Parser identifier for booleans.
pub const BOOL_PARSER: &str = "brigadier:bool";
/// Parser identifier for integers.
pub const INTEGER_PARSER: &str = "brigadier:integer";

/// Shape of a `brigadier:string` argument, written as its single property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringMode {
    /// One token, no spaces.
    SingleWord = 0,
    /// A bare word or a `"quoted phrase"`.
    QuotablePhrase = 1,
    /// Everything up to the end of the line.
    GreedyPhrase = 2,
}

/// Client-side parser hint: identifier plus opaque property bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParserSpec {
    /// Parser identifier, e.g. `brigadier:string`.
    pub identifier: &'static str,
    /// Already-encoded properties payload.
    pub properties: Vec<u8>,
}

impl ParserSpec {
    /// A `brigadier:string` parser with the given mode.
    #[must_use]
    pub fn string(mode: StringMode) -> Self {
        let mut props = WireBuffer::new();
        props.write_var_int(mode as i32);
        Self {
            identifier: STRING_PARSER,
            properties: props.into_bytes(),
        }
    }

    /// A `brigadier:bool` parser. Carries no properties.
    #[must_use]
    pub fn boolean() -> Self {
        Self {
            identifier: BOOL_PARSER,
            properties: Vec::new(),
        }
    }

    /// A `brigadier:integer` parser with optional bounds.
    #[must_use]
    pub fn integer(min: Option<i32>, max: Option<i32>) -> Self {
        let mut props = WireBuffer::new();
        let mut flags = 0u8;
        if min.is_some() {
            flags |= 0x01;
        }
        if max.is_some() {
            flags |= 0x02;
        }
        props.write_u8(flags);
        if let Some(min) = min {
            props.write_i32(min);
        }
        if let Some(max) = max {
            props.write_i32(max);
        }
        Self {
            identifier: INTEGER_PARSER,
            properties: props.into_bytes(),
        }
    }
}

/// One node an argument contributes to the graph, before linking.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeSpec {
    /// Literal or argument. Arguments never contribute a root.
    pub node_type: NodeType,
    /// Node name: the literal word or the argument identifier.
    pub name: String,
    /// Whether a command may terminate at this node.
    pub executable: bool,
    /// Parser hint. Only written to the wire for argument nodes.
    pub parser: Option<ParserSpec>,
    /// Suggestions provider, sets the has-default-suggestions bit.
    pub suggestions: Option<String>,
    /// Restriction list this node was expanded from, if any.
    pub restrictions: Option<Arc<[String]>>,
}

impl NodeSpec {
    /// A literal node with no parser.
    #[must_use]
    pub fn literal(name: impl Into<String>, executable: bool) -> Self {
        Self {
            node_type: NodeType::Literal,
            name: name.into(),
            executable,
            parser: None,
            suggestions: None,
            restrictions: None,
        }
    }

    /// An argument node with the given parser.
    #[must_use]
    pub fn argument(name: impl Into<String>, parser: ParserSpec, executable: bool) -> Self {
        Self {
            node_type: NodeType::Argument,
            name: name.into(),
            executable,
            parser: Some(parser),
            suggestions: None,
            restrictions: None,
        }
    }
}
