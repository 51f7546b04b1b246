//! Integration tests for restricted and unrestricted words
//!
//! Tests parsing outcomes, error codes, equality, and hashing.

use std::collections::HashSet;

use cmdgraph_arguments::{Argument, ArgumentType, ArgumentWord, NodeType};
use cmdgraph_foundation::{ConfigurationError, SyntaxErrorKind};

fn gamemode() -> ArgumentWord {
    ArgumentWord::new("mode")
        .with_restrictions(["survival", "creative", "adventure", "spectator"])
        .unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn restricted_word_accepts_any_casing() {
    let arg = ArgumentWord::new("value")
        .with_restrictions(["true", "false"])
        .unwrap();
    assert_eq!(arg.parse("TRUE").unwrap(), "TRUE");
    assert_eq!(arg.parse("fAlSe").unwrap(), "fAlSe");
}

#[test]
fn unrestricted_word_rejects_space() {
    let err = ArgumentWord::new("target").parse("hello world").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::Word);
    assert_eq!(err.code, ArgumentWord::SPACE_ERROR);
    assert_eq!(err.code, 1);
    assert_eq!(err.token, "hello world");
}

#[test]
fn restricted_word_rejects_unknown_value() {
    let err = gamemode().parse("hardcore").unwrap_err();
    assert_eq!(err.code, ArgumentWord::RESTRICTION_ERROR);
    assert_eq!(err.code, 2);
    assert_eq!(err.token, "hardcore");
}

#[test]
fn space_error_wins_over_restriction_error() {
    let err = gamemode().parse("creative mode").unwrap_err();
    assert_eq!(err.code, ArgumentWord::SPACE_ERROR);
}

#[test]
fn unicode_case_folding() {
    let arg = ArgumentWord::new("city").with_restrictions(["zürich"]).unwrap();
    assert_eq!(arg.parse("ZÜRICH").unwrap(), "ZÜRICH");
}

#[test]
fn restricted_word_accessors() {
    let arg = gamemode();
    assert!(arg.has_restrictions());
    assert_eq!(arg.restrictions().map(<[String]>::len), Some(4));
    assert!(ArgumentWord::new("x").restrictions().is_none());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn empty_restriction_entry_is_configuration_error() {
    let err = ArgumentWord::new("mode")
        .with_restrictions(["", "creative"])
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyRestriction { index: 0, .. }));
    assert!(format!("{err}").contains("mode"));
}

#[test]
fn restriction_with_space_is_configuration_error() {
    let err = ArgumentWord::new("mode")
        .with_restrictions(["creative mode"])
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::RestrictionContainsSeparator { ref restriction, .. }
            if restriction == "creative mode"
    ));
}

// =============================================================================
// Equality and Hashing
// =============================================================================

#[test]
fn equality_ignores_id() {
    let a = ArgumentWord::new("a").with_restrictions(["x", "y"]).unwrap();
    let b = ArgumentWord::new("b").with_restrictions(["x", "y"]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn equality_is_order_sensitive() {
    let ab = ArgumentWord::new("w").with_restrictions(["a", "b"]).unwrap();
    let ba = ArgumentWord::new("w").with_restrictions(["b", "a"]).unwrap();
    assert_ne!(ab, ba);
}

#[test]
fn restricted_and_unrestricted_differ() {
    let restricted = ArgumentWord::new("w").with_restrictions(["a"]).unwrap();
    assert_ne!(restricted, ArgumentWord::new("w"));
}

#[test]
fn hash_set_deduplicates_by_restrictions() {
    let mut set = HashSet::new();
    set.insert(ArgumentWord::new("one").with_restrictions(["a", "b"]).unwrap());
    set.insert(ArgumentWord::new("two").with_restrictions(["a", "b"]).unwrap());
    set.insert(ArgumentWord::new("three").with_restrictions(["b", "a"]).unwrap());
    set.insert(ArgumentWord::new("four"));
    set.insert(ArgumentWord::new("five"));
    assert_eq!(set.len(), 3);
}

#[test]
fn empty_restriction_list_is_not_unrestricted() {
    let empty = ArgumentWord::new("w").with_restrictions(Vec::<String>::new()).unwrap();
    assert_ne!(empty, ArgumentWord::new("w"));
    assert_eq!(empty.restrictions(), Some(&[][..]));

    let mut set = HashSet::new();
    set.insert(empty.clone());
    set.insert(ArgumentWord::new("w"));
    assert_eq!(set.len(), 2);
    assert_eq!(empty.parse("anything").unwrap(), "anything");
}

// =============================================================================
// Node Contributions
// =============================================================================

#[test]
fn restricted_word_contributes_literals_in_order() {
    let nodes = gamemode().contribute_nodes(true);
    let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["survival", "creative", "adventure", "spectator"]);
    assert!(nodes.iter().all(|n| n.node_type == NodeType::Literal && n.executable));
}

#[test]
fn wrapped_word_reports_restriction_count() {
    let arg: Argument = gamemode().into();
    assert_eq!(arg.restriction_count(), Some(4));
    let arg: Argument = ArgumentWord::new("x").into();
    assert_eq!(arg.restriction_count(), None);
}
