//! Rendering configuration
//!
//! A flat set of toggles controlling how graph nodes are translated into
//! scheduler tasks. Values are constructed directly by the embedding
//! application - nothing here reads files or the environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::TestBehavior;

/// Controls graph → task translation
///
/// Call sites that can run without one take `Option<&RenderConfig>`; absence
/// behaves exactly like `RenderConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Node selection criteria (`tag:`, `path:`, `config.materialized:`, or
    /// a bare node name). Empty selects everything.
    #[serde(default)]
    pub select: Vec<String>,

    /// Node exclusion criteria, applied after `select`
    #[serde(default)]
    pub exclude: Vec<String>,

    /// How test nodes are rendered
    #[serde(default)]
    pub test_behavior: TestBehavior,

    /// When true, a node's `meta.owner` is never propagated into task
    /// metadata, regardless of its presence on the node
    #[serde(default)]
    pub disable_node_owner: bool,

    /// Environment passed through to task arguments untouched
    #[serde(default)]
    pub env_vars: BTreeMap<String, String>,
}
