//! Core error types, wire primitives, and configuration for cmdgraph.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context, plus the three failure
//!   families ([`SyntaxError`], [`ConfigurationError`], [`SerializationLimitError`])
//! - [`WireBuffer`] / [`WireReader`] - VarInt and string primitives of the
//!   declared-graph wire format
//! - [`GraphConfig`] - Payload bounds and registration settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod wire;

pub use config::{CLIENT_MAX_PAYLOAD, GraphConfig};
pub use error::{
    ConfigurationError, Error, ErrorCode, ErrorContext, ErrorKind, Result,
    SerializationLimitError, SyntaxError, SyntaxErrorKind,
};
pub use wire::{WireBuffer, WireReader, var_int_len};
