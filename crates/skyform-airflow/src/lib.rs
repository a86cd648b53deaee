//! Graph-node → scheduler-task translation
//!
//! This crate turns selected dbt graph nodes into task descriptors for an
//! external DAG builder:
//! - Task metadata derivation (ids, operator classes, arguments, owner)
//! - Whole-graph rendering with test-behavior handling
//!
//! DAG assembly and execution stay with the orchestrator; nothing here
//! schedules anything.

pub mod metadata;
pub mod tasks;

pub use metadata::{create_task_metadata, create_test_task_metadata, resolve_owner, TaskMetadata};
pub use tasks::build_tasks;
