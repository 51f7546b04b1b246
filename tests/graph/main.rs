//! Integration tests for Layer 2: Graph
//!
//! Tests node tree building, snapshot publication, and wire serialization.

mod building;
mod snapshots;

use std::sync::Arc;

use cmdgraph_graph::{Command, CommandGraph, GraphBuilder};

/// Installs a test-writer subscriber so `warn!`/`debug!` output shows up
/// under `--nocapture`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a graph straight from commands, bypassing the registry.
pub fn build(commands: Vec<Command>) -> CommandGraph {
    let mut builder = GraphBuilder::new();
    for command in commands {
        builder.add_command(Arc::new(command)).unwrap();
    }
    builder.build(1)
}
