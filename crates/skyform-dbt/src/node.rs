//! dbt graph node model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use skyform_core::DbtResourceType;

/// A single unit of a dbt project (model, test, seed, snapshot, source)
///
/// Immutable once constructed; translation code only ever reads from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbtNode {
    /// Unique identifier (e.g. "model.jaffle_shop.orders")
    pub unique_id: String,

    /// Resource kind
    pub resource_type: DbtResourceType,

    /// Unique ids of upstream nodes
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Originating file path, relative to the project root
    #[serde(default)]
    pub file_path: PathBuf,

    /// Tags attached to the node
    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form node configuration (dbt_project.yml + in-model config).
    /// May carry a `meta.owner` entry.
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

impl DbtNode {
    /// Create a node with the given identity and no metadata
    pub fn new(unique_id: impl Into<String>, resource_type: DbtResourceType) -> Self {
        Self {
            unique_id: unique_id.into(),
            resource_type,
            depends_on: Vec::new(),
            file_path: PathBuf::new(),
            tags: Vec::new(),
            config: serde_json::Map::new(),
        }
    }

    /// Short name: the last dot-segment of the unique id
    pub fn name(&self) -> &str {
        self.unique_id
            .rsplit('.')
            .next()
            .unwrap_or(&self.unique_id)
    }

    /// Owner string from `config.meta.owner`
    ///
    /// Returns `""` when the entry is absent at any level or not a string -
    /// missing metadata is a default, not an error.
    pub fn owner(&self) -> &str {
        self.config
            .get("meta")
            .and_then(|meta| meta.get("owner"))
            .and_then(|owner| owner.as_str())
            .unwrap_or("")
    }

    /// Materialization from node config, if set
    pub fn materialized(&self) -> Option<&str> {
        self.config.get("materialized").and_then(|m| m.as_str())
    }
}
