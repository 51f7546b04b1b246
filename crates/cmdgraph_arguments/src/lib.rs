//! Typed command arguments.
//!
//! Every argument kind carries two views of the same grammar token: the
//! server-side parse rule used to validate what a user typed, and the node
//! shape the client uses for highlighting and completion.
//!
//! ```text
//! "give Notch 64"
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ TOKEN CURSOR    │  → "give" | "Notch" | "64"
//! └─────────────────┘
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ ARGUMENT PARSE  │  → Literal("give"), Word("Notch"), Integer(64)
//! └─────────────────┘
//!
//! ArgumentWord("target").contribute_nodes(..)
//!       │
//!       ▼
//! NodeSpec { Argument, "target", brigadier:string [0] }
//! ```
//!
//! # Modules
//!
//! - [`argument`] - The [`ArgumentType`] contract and the [`Argument`] enum
//! - [`word`] - Single words, optionally restricted to a legal set
//! - [`literal`] - Fixed words
//! - [`phrase`] - Quotable and greedy phrases
//! - [`boolean`] - Booleans
//! - [`integer`] - Bounded integers
//! - [`node`] - Node contributions and parser hints
//! - [`tokenizer`] - Separator handling and token spans

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod argument;
pub mod boolean;
pub mod integer;
pub mod literal;
pub mod node;
pub mod phrase;
pub mod tokenizer;
pub mod word;

// Re-export main types for convenience
pub use argument::{Argument, ArgumentType, ArgumentValue, TokenSpan};
pub use boolean::ArgumentBoolean;
pub use integer::ArgumentInteger;
pub use literal::ArgumentLiteral;
pub use node::{NodeSpec, NodeType, ParserSpec, StringMode};
pub use phrase::{ArgumentPhrase, PhraseMode};
pub use tokenizer::{SEPARATOR, TokenCursor};
pub use word::ArgumentWord;
