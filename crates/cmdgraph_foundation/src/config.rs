//! Configuration for graph building and serialization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest payload the client accepts for a single packet.
pub const CLIENT_MAX_PAYLOAD: usize = 2_097_151;

/// Configuration for the command graph.
///
/// Controls payload bounds and registration-time warnings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphConfig {
    /// Upper bound on the serialized graph, in bytes.
    pub max_payload_bytes: usize,

    /// Restriction lists longer than this log a warning at registration.
    pub max_restrictions: usize,

    /// Whether command names and aliases match case-insensitively.
    pub case_insensitive_commands: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: CLIENT_MAX_PAYLOAD,
            max_restrictions: 64,
            case_insensitive_commands: true,
        }
    }
}

impl GraphConfig {
    /// Builder method to set the payload bound.
    #[must_use]
    pub fn with_max_payload_bytes(mut self, bytes: usize) -> Self {
        self.max_payload_bytes = bytes;
        self
    }

    /// Builder method to set the restriction warning threshold.
    #[must_use]
    pub fn with_max_restrictions(mut self, count: usize) -> Self {
        self.max_restrictions = count;
        self
    }

    /// Builder method to set command name case sensitivity.
    #[must_use]
    pub fn with_case_insensitive_commands(mut self, enabled: bool) -> Self {
        self.case_insensitive_commands = enabled;
        self
    }
}
