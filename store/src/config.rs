//! Node database configuration.

use arbor_primitives::{MAX_KEY_LEN, MAX_VALUE_LEN};
use serde::{Deserialize, Serialize};

/// Configuration for a [`NodeDb`](crate::NodeDb).
///
/// Limits apply to logical keys and values written through the fast-node
/// helpers. Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDbConfig {
    /// Maximum length of a logical key in bytes.
    pub max_key_len: usize,
    /// Maximum length of a logical value in bytes.
    pub max_value_len: usize,
}

impl Default for NodeDbConfig {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
        }
    }
}
