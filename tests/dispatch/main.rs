//! Integration tests for command dispatch
//!
//! Tests command-line validation against published snapshots: syntax
//! backtracking, restricted words, phrases, and command name lookup.

use cmdgraph_arguments::{
    ArgumentBoolean, ArgumentInteger, ArgumentLiteral, ArgumentPhrase, ArgumentValue,
    ArgumentWord,
};
use cmdgraph_foundation::{GraphConfig, SyntaxErrorKind};
use cmdgraph_graph::{Command, CommandDispatcher, CommandRegistry};

fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::default();

    registry
        .register_with(|| {
            Command::builder("gamemode")
                .alias("gm")
                .syntax(vec![
                    ArgumentWord::new("mode")
                        .with_restrictions(["survival", "creative"])?
                        .into(),
                ])
                .syntax(vec![
                    ArgumentWord::new("mode")
                        .with_restrictions(["survival", "creative"])?
                        .into(),
                    ArgumentWord::new("target").into(),
                ])
                .build()
        })
        .unwrap();

    registry
        .register_with(|| {
            Command::builder("say")
                .syntax(vec![ArgumentPhrase::greedy("message").into()])
                .build()
        })
        .unwrap();

    registry
        .register_with(|| {
            Command::builder("sign")
                .syntax(vec![
                    ArgumentPhrase::quotable("text").into(),
                    ArgumentInteger::new("line").between(1, 4)?.into(),
                ])
                .build()
        })
        .unwrap();

    registry
        .register_with(|| {
            Command::builder("rule")
                .syntax(vec![
                    ArgumentLiteral::new("set").into(),
                    ArgumentWord::new("name").into(),
                    ArgumentBoolean::new("value").into(),
                ])
                .build()
        })
        .unwrap();

    registry
        .register_with(|| Command::builder("help").runnable().build())
        .unwrap();

    registry
}

// =============================================================================
// Restricted Words
// =============================================================================

#[test]
fn restricted_word_keeps_typed_casing() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, "/gamemode CREATIVE").unwrap();
    assert_eq!(parsed.command, "gamemode");
    assert_eq!(parsed.syntax, Some(0));
    assert_eq!(
        parsed.get("mode"),
        Some(&ArgumentValue::Word("CREATIVE".to_string()))
    );
}

#[test]
fn restricted_word_with_target_uses_second_syntax() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, "gm survival Notch").unwrap();
    assert_eq!(parsed.command, "gamemode");
    assert_eq!(parsed.syntax, Some(1));
    assert_eq!(parsed.get("target").and_then(ArgumentValue::as_str), Some("Notch"));
}

#[test]
fn restriction_error_surfaces_from_dispatch() {
    let graph = registry().snapshot();
    let err = CommandDispatcher::parse(&graph, "gamemode hardcore").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::Word);
    assert_eq!(err.code, ArgumentWord::RESTRICTION_ERROR);
    assert_eq!(err.token, "hardcore");
}

// =============================================================================
// Phrases and Typed Values
// =============================================================================

#[test]
fn greedy_phrase_takes_rest_of_line() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, "say hello  there, world").unwrap();
    assert_eq!(
        parsed.get("message").and_then(ArgumentValue::as_str),
        Some("hello  there, world")
    );
}

#[test]
fn quoted_phrase_then_integer() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, r#"sign "Welcome \"home\"" 2"#).unwrap();
    assert_eq!(
        parsed.get("text").and_then(ArgumentValue::as_str),
        Some(r#"Welcome "home""#)
    );
    assert_eq!(parsed.get("line").and_then(ArgumentValue::as_int), Some(2));

    let err = CommandDispatcher::parse(&graph, r#"sign "Welcome" 9"#).unwrap_err();
    assert_eq!(err.code, ArgumentInteger::TOO_HIGH);
}

#[test]
fn literal_word_and_boolean() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, "rule set keepInventory TRUE").unwrap();
    assert_eq!(parsed.get("set").and_then(ArgumentValue::as_str), Some("set"));
    assert_eq!(parsed.get("value").and_then(ArgumentValue::as_bool), Some(true));

    let err = CommandDispatcher::parse(&graph, "rule get keepInventory").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::Literal);
}

// =============================================================================
// Command Names
// =============================================================================

#[test]
fn runnable_command_without_arguments() {
    let graph = registry().snapshot();
    let parsed = CommandDispatcher::parse(&graph, "help").unwrap();
    assert_eq!(parsed.syntax, None);
    assert!(parsed.values.is_empty());

    let err = CommandDispatcher::parse(&graph, "help me").unwrap_err();
    assert_eq!(err.code, CommandDispatcher::TRAILING_INPUT);
}

#[test]
fn command_names_ignore_case_by_default() {
    let graph = registry().snapshot();
    assert!(CommandDispatcher::parse(&graph, "HELP").is_ok());
}

#[test]
fn case_sensitive_registry_rejects_other_casing() {
    let mut registry =
        CommandRegistry::new(GraphConfig::default().with_case_insensitive_commands(false));
    let graph = registry
        .register_with(|| Command::builder("help").runnable().build())
        .unwrap();

    assert!(CommandDispatcher::parse(&graph, "help").is_ok());
    let err = CommandDispatcher::parse(&graph, "HELP").unwrap_err();
    assert_eq!(err.code, CommandDispatcher::UNKNOWN_COMMAND);
}

#[test]
fn dispatch_uses_the_snapshot_it_was_given() {
    let mut registry = registry();
    let old = registry.snapshot();
    registry.unregister("say").unwrap();

    assert!(CommandDispatcher::parse(&old, "say hi").is_ok());
    let err = CommandDispatcher::parse(&registry.snapshot(), "say hi").unwrap_err();
    assert_eq!(err.code, CommandDispatcher::UNKNOWN_COMMAND);
}
