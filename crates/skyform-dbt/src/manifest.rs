//! dbt manifest.json parsing
//!
//! Parses dbt-generated manifest.json to extract nodes, sources, and
//! dependencies. Only the subset of fields the translation layer needs is
//! read; everything else in the artifact is ignored.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use skyform_core::DbtResourceType;

use crate::node::DbtNode;

/// A parsed dbt manifest: graph nodes keyed by unique id
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Metadata about the manifest
    pub metadata: ManifestMetadata,

    /// All graph nodes (models, tests, seeds, snapshots, and sources)
    pub nodes: HashMap<String, DbtNode>,
}

impl Manifest {
    /// Load manifest from file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse manifest from JSON string
    pub fn from_str(json: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            serde_json::from_str(json).map_err(|e| ManifestError::ParseError(e.to_string()))?;

        Ok(raw.into())
    }

    /// Get all model nodes (filters out tests, seeds, sources, etc.)
    pub fn models(&self) -> HashMap<String, &DbtNode> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.resource_type == DbtResourceType::Model)
            .map(|(id, node)| (id.clone(), node))
            .collect()
    }

    /// Get a specific node by unique_id
    pub fn get_node(&self, unique_id: &str) -> Option<&DbtNode> {
        self.nodes.get(unique_id)
    }
}

/// Manifest metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManifestMetadata {
    #[serde(default)]
    pub dbt_schema_version: String,

    #[serde(default)]
    pub dbt_version: String,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default)]
    pub invocation_id: Option<String>,
}

/// manifest.json as dbt writes it; converted into [`DbtNode`]s on load
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    metadata: ManifestMetadata,

    #[serde(default)]
    nodes: HashMap<String, RawNode>,

    #[serde(default)]
    sources: HashMap<String, RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    unique_id: String,

    resource_type: DbtResourceType,

    #[serde(default)]
    original_file_path: PathBuf,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default)]
    config: serde_json::Map<String, serde_json::Value>,

    #[serde(default)]
    depends_on: RawDependsOn,
}

#[derive(Debug, Default, Deserialize)]
struct RawDependsOn {
    #[serde(default)]
    nodes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    unique_id: String,

    #[serde(default)]
    original_file_path: PathBuf,

    #[serde(default)]
    tags: Vec<String>,
}

impl From<RawManifest> for Manifest {
    fn from(raw: RawManifest) -> Self {
        let mut nodes: HashMap<String, DbtNode> = HashMap::with_capacity(
            raw.nodes.len() + raw.sources.len(),
        );

        for (id, node) in raw.nodes {
            nodes.insert(
                id,
                DbtNode {
                    unique_id: node.unique_id,
                    resource_type: node.resource_type,
                    depends_on: node.depends_on.nodes,
                    file_path: node.original_file_path,
                    tags: node.tags,
                    config: node.config,
                },
            );
        }

        // Sources join the graph as leaf nodes so dependency edges resolve.
        for (id, source) in raw.sources {
            nodes.insert(
                id,
                DbtNode {
                    unique_id: source.unique_id,
                    resource_type: DbtResourceType::Source,
                    depends_on: Vec::new(),
                    file_path: source.original_file_path,
                    tags: source.tags,
                    config: serde_json::Map::new(),
                },
            );
        }

        Self {
            metadata: raw.metadata,
            nodes,
        }
    }
}

/// Manifest parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse manifest JSON: {0}")]
    ParseError(String),
}
