//! Project graph with selection and dependency ordering
//!
//! Holds the full node set parsed from a manifest plus the subset selected
//! by a render configuration. Ordering is computed over the selected subset
//! only; edges pointing outside it are dropped.

use std::collections::{BTreeMap, HashMap, VecDeque};

use skyform_core::RenderConfig;

use crate::manifest::Manifest;
use crate::node::DbtNode;
use crate::selector::SelectorConfig;

/// A dbt project graph
#[derive(Debug, Clone)]
pub struct DbtGraph {
    /// All nodes parsed from the manifest
    pub nodes: HashMap<String, DbtNode>,

    /// Nodes surviving select/exclude; starts out equal to `nodes`
    pub filtered_nodes: HashMap<String, DbtNode>,
}

impl DbtGraph {
    /// Build a graph from a parsed manifest
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(manifest.nodes.clone())
    }

    /// Build a graph from a prepared node map
    pub fn new(nodes: HashMap<String, DbtNode>) -> Self {
        let filtered_nodes = nodes.clone();
        Self {
            nodes,
            filtered_nodes,
        }
    }

    /// Apply a render configuration's select/exclude to the graph
    pub fn filter(&mut self, config: &RenderConfig) {
        let selector = SelectorConfig::from_render_config(config);
        self.filtered_nodes = self
            .nodes
            .iter()
            .filter(|(_, node)| selector.is_selected(node))
            .map(|(id, node)| (id.clone(), node.clone()))
            .collect();

        tracing::debug!(
            selected = self.filtered_nodes.len(),
            total = self.nodes.len(),
            "applied graph selection"
        );
    }

    /// Selected nodes in dependency order (parents before children)
    ///
    /// Kahn's algorithm over the selected subset. Ordering is deterministic:
    /// ties resolve by unique id. A cycle among selected nodes is an error.
    pub fn topological_order(&self) -> Result<Vec<&DbtNode>, GraphError> {
        // In-degrees and child lists restricted to the selected subset.
        // BTreeMaps keep iteration (and therefore output) deterministic.
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (id, node) in &self.filtered_nodes {
            in_degree.entry(id).or_insert(0);
            for parent in &node.depends_on {
                if self.filtered_nodes.contains_key(parent) {
                    *in_degree.entry(id).or_insert(0) += 1;
                    children.entry(parent).or_default().push(id);
                }
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut order = Vec::with_capacity(self.filtered_nodes.len());
        while let Some(id) = queue.pop_front() {
            order.push(&self.filtered_nodes[id]);

            if let Some(child_ids) = children.get(id) {
                for &child in child_ids {
                    let degree = in_degree
                        .get_mut(child)
                        .expect("child came from the selected subset");
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        if order.len() == self.filtered_nodes.len() {
            Ok(order)
        } else {
            let mut remaining: Vec<String> = in_degree
                .iter()
                .filter(|(_, &degree)| degree > 0)
                .map(|(&id, _)| id.to_string())
                .collect();
            remaining.sort();
            Err(GraphError::Cycle(remaining))
        }
    }
}

/// Graph construction and ordering errors
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Dependency cycle among nodes: {0:?}")]
    Cycle(Vec<String>),
}
