//! Integration tests for Layer 1: Arguments
//!
//! Tests argument parsing, restrictions, equality, and node contributions.

mod word;
