//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration of a `NodeStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStorageConfig {
    /// Entries pre-allocated in every table.
    pub initial_capacity: usize,
    /// Encode small values of inlineable datatypes directly in the
    /// `NodeId` instead of interning them.
    pub inline_literals: bool,
}

impl Default for NodeStorageConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            inline_literals: true,
        }
    }
}

impl NodeStorageConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_inline_literals(mut self, inline_literals: bool) -> Self {
        self.inline_literals = inline_literals;
        self
    }
}
