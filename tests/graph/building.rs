//! Integration tests for the node tree builder
//!
//! Tests literal fan-out, prefix sharing, executability, and aliases.

use cmdgraph_arguments::node::STRING_PARSER;
use cmdgraph_arguments::{ArgumentInteger, ArgumentLiteral, ArgumentPhrase, ArgumentWord, NodeType};
use cmdgraph_graph::{Command, NodeId};

use crate::build;

fn mode_command() -> Command {
    Command::builder("mode")
        .syntax(vec![
            ArgumentWord::new("value")
                .with_restrictions(["true", "false"])
                .unwrap()
                .into(),
        ])
        .build()
        .unwrap()
}

// =============================================================================
// Restricted Words
// =============================================================================

#[test]
fn restricted_word_becomes_two_executable_literals() {
    let graph = build(vec![mode_command()]);

    let root_children = graph.children(NodeId::ROOT);
    assert_eq!(root_children.len(), 1);
    let mode = root_children[0];
    assert_eq!(graph.node(mode).name(), "mode");
    assert!(!graph.node(mode).executable);

    let leaves: Vec<_> = graph.children(mode).iter().map(|&id| graph.node(id)).collect();
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[0].name(), "true");
    assert_eq!(leaves[1].name(), "false");
    for leaf in &leaves {
        assert_eq!(leaf.node_type, NodeType::Literal);
        assert!(leaf.executable);
        assert_eq!(leaf.parser_identifier(), Some(STRING_PARSER));
    }
    assert_eq!(leaves[0].parser, leaves[1].parser);
}

#[test]
fn unrestricted_word_becomes_one_argument() {
    let kick = Command::builder("kick")
        .syntax(vec![ArgumentWord::new("target").into()])
        .build()
        .unwrap();
    let graph = build(vec![kick]);

    let kick_node = graph.children(NodeId::ROOT)[0];
    let args = graph.children(kick_node);
    assert_eq!(args.len(), 1);
    let target = graph.node(args[0]);
    assert_eq!(target.node_type, NodeType::Argument);
    assert_eq!(target.name(), "target");
    assert!(target.executable);
}

#[test]
fn following_argument_hangs_off_every_literal() {
    let cmd = Command::builder("gamemode")
        .syntax(vec![
            ArgumentWord::new("mode")
                .with_restrictions(["survival", "creative", "adventure"])
                .unwrap()
                .into(),
            ArgumentWord::new("target").into(),
        ])
        .build()
        .unwrap();
    let graph = build(vec![cmd]);

    let gamemode = graph.children(NodeId::ROOT)[0];
    let modes = graph.children(gamemode);
    assert_eq!(modes.len(), 3);
    for &mode in modes {
        assert!(!graph.node(mode).executable);
        let targets = graph.children(mode);
        assert_eq!(targets.len(), 1);
        assert_eq!(graph.node(targets[0]).name(), "target");
        assert!(graph.node(targets[0]).executable);
    }
    // root, gamemode, 3 literals, 3 targets
    assert_eq!(graph.len(), 8);
}

// =============================================================================
// Deduplication
// =============================================================================

#[test]
fn shared_prefixes_are_not_duplicated() {
    let give = Command::builder("give")
        .syntax(vec![
            ArgumentWord::new("target").into(),
            ArgumentInteger::new("amount").into(),
        ])
        .syntax(vec![
            ArgumentWord::new("target").into(),
            ArgumentPhrase::greedy("item").into(),
        ])
        .build()
        .unwrap();
    let graph = build(vec![give]);

    let give_node = graph.children(NodeId::ROOT)[0];
    assert_eq!(graph.children_named(give_node, "target").count(), 1);
    // root, give, target, amount, item
    assert_eq!(graph.len(), 5);
}

#[test]
fn no_duplicate_siblings_for_identical_paths() {
    let cmd = Command::builder("time")
        .syntax(vec![ArgumentLiteral::new("set").into(), ArgumentInteger::new("t").into()])
        .syntax(vec![ArgumentLiteral::new("set").into(), ArgumentInteger::new("t").into()])
        .build()
        .unwrap();
    let graph = build(vec![cmd]);

    for (id, node) in graph.nodes() {
        let mut names: Vec<_> = graph.children(id).iter().map(|&c| graph.node(c).name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate children under '{}'", node.name());
    }
}

#[test]
fn optional_trailing_argument_keeps_both_flags() {
    let cmd = Command::builder("weather")
        .syntax(vec![ArgumentWord::new("kind").into()])
        .syntax(vec![ArgumentWord::new("kind").into(), ArgumentInteger::new("duration").into()])
        .build()
        .unwrap();
    let graph = build(vec![cmd]);

    let weather = graph.children(NodeId::ROOT)[0];
    let kinds: Vec<_> = graph.children_named(weather, "kind").collect();
    assert_eq!(kinds.len(), 2);
    let executable: Vec<_> = kinds.iter().map(|&k| graph.node(k).executable).collect();
    assert_eq!(executable, [true, false]);
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn aliases_redirect_to_main_literal() {
    let cmd = Command::builder("teleport")
        .alias("tp")
        .syntax(vec![ArgumentWord::new("target").into()])
        .build()
        .unwrap();
    let graph = build(vec![cmd]);

    let top = graph.children(NodeId::ROOT);
    assert_eq!(top.len(), 2);
    let main = top[0];
    let alias = graph.node(top[1]);
    assert_eq!(alias.name(), "tp");
    assert_eq!(alias.redirect, Some(main));
    assert!(alias.children.is_empty());
    assert_eq!(graph.groups()[0].roots, vec![main, top[1]]);
}

#[test]
fn commands_are_found_by_alias_ignoring_case() {
    let cmd = Command::builder("teleport").alias("tp").build().unwrap();
    let graph = build(vec![cmd]);
    assert_eq!(graph.find_command("TP").map(Command::name), Some("teleport"));
    assert!(graph.find_command("warp").is_none());
}
