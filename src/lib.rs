//! Cmdgraph - Typed command arguments and client command graphs
//!
//! This crate re-exports all layers of the cmdgraph system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: cmdgraph_graph      - Node tree builder, registry, serializer, dispatcher
//! Layer 1: cmdgraph_arguments  - Argument kinds, tokenizer, node contributions
//! Layer 0: cmdgraph_foundation - Errors, configuration, VarInt wire buffer
//! ```

pub use cmdgraph_arguments as arguments;
pub use cmdgraph_foundation as foundation;
pub use cmdgraph_graph as graph;
