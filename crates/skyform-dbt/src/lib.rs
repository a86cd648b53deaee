//! dbt artifact parsing and graph construction
//!
//! This crate handles:
//! - Parsing manifest.json (dbt-generated artifacts) into graph nodes
//! - Node selection (select/exclude criteria)
//! - Dependency ordering of the selected graph

pub mod graph;
pub mod manifest;
pub mod node;
pub mod selector;

pub use graph::{DbtGraph, GraphError};
pub use manifest::{Manifest, ManifestError, ManifestMetadata};
pub use node::DbtNode;
pub use selector::SelectorConfig;
