//! Skyform Core
//!
//! Shared domain types for the dbt → orchestrator integration layer:
//! - Rendering configuration (how graph nodes become tasks)
//! - Execution-mode and test-behavior enums with stable string names

pub mod config;
pub mod constants;

pub use config::RenderConfig;
pub use constants::{DbtResourceType, ExecutionMode, TestBehavior, TestIndirectSelection};
