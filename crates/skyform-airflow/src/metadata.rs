//! Task metadata derivation
//!
//! Maps a single graph node to the descriptor an external DAG builder needs
//! to construct a schedulable task. Pure derivation over immutable inputs;
//! missing metadata resolves to defaults, never to an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use skyform_core::{DbtResourceType, ExecutionMode, RenderConfig, TestIndirectSelection};
use skyform_dbt::DbtNode;

/// Descriptor for one schedulable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Task identifier, unique within its task group
    pub id: String,

    /// Operator class the DAG builder should instantiate
    pub operator_class: String,

    /// Owner attribution; `""` means no owner assigned
    pub owner: String,

    /// Operator keyword arguments
    pub arguments: BTreeMap<String, serde_json::Value>,
}

/// The single owner-resolution rule
///
/// `""` iff there is no node, the node carries no `meta.owner`, or the
/// render configuration disables owner propagation. Otherwise exactly the
/// node's owner string. Both metadata builders consult this and nothing
/// else.
pub fn resolve_owner(node: Option<&DbtNode>, render_config: Option<&RenderConfig>) -> String {
    let Some(node) = node else {
        return String::new();
    };
    if render_config.is_some_and(|config| config.disable_node_owner) {
        return String::new();
    }
    node.owner().to_string()
}

/// Derive task metadata for a graph node
///
/// Returns `None` for nodes that do not translate into runnable tasks
/// (sources, unrecognized resource types). `render_config` may be absent;
/// absence behaves like the defaults.
pub fn create_task_metadata(
    node: &DbtNode,
    execution_mode: ExecutionMode,
    args: &BTreeMap<String, serde_json::Value>,
    task_group_identifier: &str,
    render_config: Option<&RenderConfig>,
) -> Option<TaskMetadata> {
    if !node.resource_type.is_executable() {
        return None;
    }

    let id = match node.resource_type {
        DbtResourceType::Model => format!("{}_run", node.name()),
        resource_type => format!("{}_{}", node.name(), resource_type),
    };

    let mut arguments = args.clone();
    arguments.insert(
        "models".to_string(),
        serde_json::Value::String(node.name().to_string()),
    );
    arguments.insert(
        "task_group_identifier".to_string(),
        serde_json::Value::String(task_group_identifier.to_string()),
    );
    insert_env(&mut arguments, render_config);

    Some(TaskMetadata {
        id,
        operator_class: operator_class(node.resource_type, execution_mode),
        owner: resolve_owner(Some(node), render_config),
        arguments,
    })
}

/// Derive metadata for a test task
///
/// `node` is absent for aggregate after-all test tasks that are not tied to
/// a single model; those never carry an owner.
pub fn create_test_task_metadata(
    test_task_name: &str,
    execution_mode: ExecutionMode,
    test_indirect_selection: TestIndirectSelection,
    task_args: &BTreeMap<String, serde_json::Value>,
    node: Option<&DbtNode>,
    render_config: Option<&RenderConfig>,
) -> TaskMetadata {
    let mut arguments = task_args.clone();
    if let Some(node) = node {
        arguments.insert(
            "models".to_string(),
            serde_json::Value::String(node.name().to_string()),
        );
    }
    if test_indirect_selection != TestIndirectSelection::Eager {
        arguments.insert(
            "indirect_selection".to_string(),
            serde_json::Value::String(test_indirect_selection.as_str().to_string()),
        );
    }
    insert_env(&mut arguments, render_config);

    TaskMetadata {
        id: test_task_name.to_string(),
        operator_class: operator_class(DbtResourceType::Test, execution_mode),
        owner: resolve_owner(node, render_config),
        arguments,
    }
}

/// `Dbt<Verb><Mode>Operator`, e.g. `DbtRunLocalOperator`
fn operator_class(resource_type: DbtResourceType, execution_mode: ExecutionMode) -> String {
    let verb = match resource_type {
        DbtResourceType::Model => "Run",
        DbtResourceType::Test => "Test",
        DbtResourceType::Seed => "Seed",
        DbtResourceType::Snapshot => "Snapshot",
        // Callers filter these out via is_executable() before naming.
        DbtResourceType::Source | DbtResourceType::Unknown => "Run",
    };
    format!("Dbt{}{}Operator", verb, execution_mode.operator_suffix())
}

/// Pass the render configuration's env through to the operator untouched
fn insert_env(
    arguments: &mut BTreeMap<String, serde_json::Value>,
    render_config: Option<&RenderConfig>,
) {
    if let Some(config) = render_config {
        if !config.env_vars.is_empty() {
            arguments.insert(
                "env".to_string(),
                serde_json::Value::Object(
                    config
                        .env_vars
                        .iter()
                        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                        .collect(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_owner(owner: &str) -> DbtNode {
        let mut node = DbtNode::new("model.jaffle_shop.orders", DbtResourceType::Model);
        node.config = serde_json::json!({"meta": {"owner": owner}})
            .as_object()
            .cloned()
            .unwrap();
        node
    }

    fn model_without_owner() -> DbtNode {
        DbtNode::new("model.jaffle_shop.orders", DbtResourceType::Model)
    }

    #[test]
    fn owner_propagates_by_default() {
        let node = model_with_owner("analytics");
        assert_eq!(resolve_owner(Some(&node), None), "analytics");
        assert_eq!(
            resolve_owner(Some(&node), Some(&RenderConfig::default())),
            "analytics"
        );
    }

    #[test]
    fn owner_suppressed_when_disabled() {
        let node = model_with_owner("analytics");
        let config = RenderConfig {
            disable_node_owner: true,
            ..Default::default()
        };
        assert_eq!(resolve_owner(Some(&node), Some(&config)), "");
    }

    #[test]
    fn owner_empty_without_node() {
        assert_eq!(resolve_owner(None, None), "");
        assert_eq!(resolve_owner(None, Some(&RenderConfig::default())), "");
    }

    #[test]
    fn owner_empty_when_node_has_none() {
        let node = model_without_owner();
        assert_eq!(resolve_owner(Some(&node), None), "");
        let config = RenderConfig {
            disable_node_owner: true,
            ..Default::default()
        };
        assert_eq!(resolve_owner(Some(&node), Some(&config)), "");
    }

    #[test]
    fn model_task_id_and_operator() {
        let node = model_with_owner("analytics");
        let metadata =
            create_task_metadata(&node, ExecutionMode::Local, &BTreeMap::new(), "dag", None)
                .unwrap();
        assert_eq!(metadata.id, "orders_run");
        assert_eq!(metadata.operator_class, "DbtRunLocalOperator");
        assert_eq!(metadata.arguments["models"], "orders");
        assert_eq!(metadata.arguments["task_group_identifier"], "dag");
    }

    #[test]
    fn seed_task_id_uses_resource_type() {
        let node = DbtNode::new("seed.jaffle_shop.countries", DbtResourceType::Seed);
        let metadata =
            create_task_metadata(&node, ExecutionMode::Docker, &BTreeMap::new(), "dag", None)
                .unwrap();
        assert_eq!(metadata.id, "countries_seed");
        assert_eq!(metadata.operator_class, "DbtSeedDockerOperator");
    }

    #[test]
    fn source_nodes_produce_no_task() {
        let node = DbtNode::new("source.jaffle_shop.raw.orders", DbtResourceType::Source);
        let metadata =
            create_task_metadata(&node, ExecutionMode::Local, &BTreeMap::new(), "dag", None);
        assert!(metadata.is_none());
    }

    #[test]
    fn base_arguments_are_preserved() {
        let node = model_without_owner();
        let args = BTreeMap::from([(
            "full_refresh".to_string(),
            serde_json::Value::Bool(true),
        )]);
        let metadata =
            create_task_metadata(&node, ExecutionMode::Local, &args, "dag", None).unwrap();
        assert_eq!(metadata.arguments["full_refresh"], true);
    }

    #[test]
    fn env_vars_pass_through() {
        let node = model_without_owner();
        let config = RenderConfig {
            env_vars: BTreeMap::from([("DBT_TARGET".to_string(), "prod".to_string())]),
            ..Default::default()
        };
        let metadata =
            create_task_metadata(&node, ExecutionMode::Local, &BTreeMap::new(), "dag", Some(&config))
                .unwrap();
        assert_eq!(metadata.arguments["env"]["DBT_TARGET"], "prod");
    }

    #[test]
    fn test_task_scopes_models_to_its_node() {
        let node = model_with_owner("analytics");
        let metadata = create_test_task_metadata(
            "orders_test",
            ExecutionMode::Local,
            TestIndirectSelection::Eager,
            &BTreeMap::new(),
            Some(&node),
            None,
        );
        assert_eq!(metadata.id, "orders_test");
        assert_eq!(metadata.operator_class, "DbtTestLocalOperator");
        assert_eq!(metadata.arguments["models"], "orders");
        assert_eq!(metadata.owner, "analytics");
    }

    #[test]
    fn eager_indirect_selection_adds_no_argument() {
        let metadata = create_test_task_metadata(
            "all_test",
            ExecutionMode::Local,
            TestIndirectSelection::Eager,
            &BTreeMap::new(),
            None,
            None,
        );
        assert!(!metadata.arguments.contains_key("indirect_selection"));
        assert!(!metadata.arguments.contains_key("models"));
    }

    #[test]
    fn non_eager_indirect_selection_is_forwarded() {
        let metadata = create_test_task_metadata(
            "all_test",
            ExecutionMode::Local,
            TestIndirectSelection::Cautious,
            &BTreeMap::new(),
            None,
            None,
        );
        assert_eq!(metadata.arguments["indirect_selection"], "cautious");
    }
}
