//! Whole-graph task rendering
//!
//! Walks the selected graph in dependency order and derives one task per
//! runnable node, then appends test tasks according to the configured test
//! behavior. Standalone test nodes are never rendered as their own tasks -
//! their execution is folded into the generated test tasks.

use std::collections::BTreeMap;

use skyform_core::{DbtResourceType, ExecutionMode, RenderConfig, TestBehavior, TestIndirectSelection};
use skyform_dbt::{DbtGraph, GraphError};

use crate::metadata::{create_task_metadata, create_test_task_metadata, TaskMetadata};

/// Render the selected graph to task descriptors in dependency order
pub fn build_tasks(
    graph: &DbtGraph,
    execution_mode: ExecutionMode,
    render_config: &RenderConfig,
    task_group_identifier: &str,
) -> Result<Vec<TaskMetadata>, GraphError> {
    let order = graph.topological_order()?;
    let base_args: BTreeMap<String, serde_json::Value> = BTreeMap::new();

    let mut tasks = Vec::new();
    for &node in &order {
        if node.resource_type == DbtResourceType::Test {
            continue;
        }

        let Some(metadata) = create_task_metadata(
            node,
            execution_mode,
            &base_args,
            task_group_identifier,
            Some(render_config),
        ) else {
            continue;
        };
        tasks.push(metadata);

        if render_config.test_behavior == TestBehavior::AfterEach
            && node.resource_type == DbtResourceType::Model
        {
            tasks.push(create_test_task_metadata(
                &format!("{}_test", node.name()),
                execution_mode,
                TestIndirectSelection::default(),
                &base_args,
                Some(node),
                Some(render_config),
            ));
        }
    }

    if render_config.test_behavior == TestBehavior::AfterAll {
        tasks.push(create_test_task_metadata(
            &format!("{task_group_identifier}_test"),
            execution_mode,
            TestIndirectSelection::default(),
            &base_args,
            None,
            Some(render_config),
        ));
    }

    tracing::debug!(
        tasks = tasks.len(),
        nodes = order.len(),
        "rendered graph to task metadata"
    );

    Ok(tasks)
}
