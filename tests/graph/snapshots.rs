//! Integration tests for versioned snapshots
//!
//! Tests that published graphs are immutable and safe to read from many
//! threads while the registry keeps changing.

use std::sync::Arc;
use std::thread;

use cmdgraph_arguments::ArgumentWord;
use cmdgraph_foundation::{ConfigurationError, GraphConfig};
use cmdgraph_graph::{Command, CommandRegistry, serialize};

fn simple(name: &str) -> Command {
    Command::builder(name)
        .syntax(vec![ArgumentWord::new("target").into()])
        .build()
        .unwrap()
}

#[test]
fn generations_increase_monotonically() {
    let mut registry = CommandRegistry::default();
    let mut last = registry.generation();
    for name in ["a", "b", "c"] {
        let graph = registry.register(simple(name)).unwrap();
        assert!(graph.generation() > last);
        last = graph.generation();
    }
    assert_eq!(registry.snapshot().generation(), last);
}

#[test]
fn held_snapshot_survives_later_changes() {
    let mut registry = CommandRegistry::default();
    registry.register(simple("kick")).unwrap();
    let held = registry.snapshot();
    let held_bytes = serialize(&held, registry.config()).unwrap().bytes;

    registry.register(simple("ban")).unwrap();
    registry.unregister("kick").unwrap();

    assert!(held.find_command("kick").is_some());
    assert!(held.find_command("ban").is_none());
    assert_eq!(serialize(&held, registry.config()).unwrap().bytes, held_bytes);
    assert_ne!(registry.serialize().unwrap().bytes, held_bytes);
}

#[test]
fn rejected_registration_keeps_published_graph() {
    let mut registry = CommandRegistry::default();
    let before = registry.register(simple("kick")).unwrap();

    let err = registry
        .register_with(|| {
            let word = ArgumentWord::new("mode").with_restrictions(["a", "b c"])?;
            Command::builder("mode").syntax(vec![word.into()]).build()
        })
        .unwrap_err();
    assert!(matches!(
        err.as_configuration(),
        Some(ConfigurationError::RestrictionContainsSeparator { .. })
    ));
    assert!(Arc::ptr_eq(&before, &registry.snapshot()));
}

#[test]
fn concurrent_serialization_during_rebuilds() {
    let mut registry = CommandRegistry::default();
    for i in 0..20 {
        registry.register(simple(&format!("cmd{i}"))).unwrap();
    }
    let snapshot = registry.snapshot();
    let config = GraphConfig::default();
    let expected = serialize(&snapshot, &config).unwrap().bytes;

    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&snapshot);
                let config = &config;
                let expected = &expected;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let bytes = serialize(&graph, config).unwrap().bytes;
                        assert_eq!(&bytes, expected);
                    }
                })
            })
            .collect();

        for i in 20..40 {
            registry.register(simple(&format!("cmd{i}"))).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    });

    assert_eq!(registry.len(), 40);
    assert_eq!(snapshot.commands().count(), 20);
}
