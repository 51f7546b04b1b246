//! Command graph building, publication, serialization, and dispatch.
//!
//! # Architecture
//!
//! ```text
//! Command { "mode", [Word(value) from {true,false}] }
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ GRAPH BUILDER   │  → ROOT ─ "mode" ─┬─ "true"  (literal, executable)
//! │                 │                   └─ "false" (literal, executable)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ REGISTRY        │  → Arc<CommandGraph> snapshot, generation N
//! └─────────────────┘
//!          │                                   │
//!          ▼                                   ▼
//! ┌─────────────────┐                ┌─────────────────┐
//! │ SERIALIZER      │  → bytes       │ DISPATCHER      │  → ParsedCommand
//! └─────────────────┘                └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`command`] - Command and syntax definitions
//! - [`builder`] - Node tree building with prefix deduplication
//! - [`graph`] - The immutable published graph
//! - [`registry`] - Single-writer registry publishing snapshots
//! - [`serializer`] - Wire encoding with payload bounding, and decoding
//! - [`dispatcher`] - Validation of raw command lines

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod command;
pub mod dispatcher;
pub mod graph;
pub mod registry;
pub mod serializer;

// Re-export main types for convenience
pub use builder::GraphBuilder;
pub use command::{Command, CommandBuilder, Syntax};
pub use dispatcher::{CommandDispatcher, ParsedCommand};
pub use graph::{CommandGraph, CommandGroup, Node, NodeId};
pub use registry::CommandRegistry;
pub use serializer::{DecodedGraph, DecodedNode, SerializedGraph, decode, serialize};
