//! Stable enums shared across the workspace
//!
//! IMPORTANT: The serialized names of these enums appear in rendered task
//! arguments and generated profiles. Do NOT rename variants - only add new
//! ones.

use serde::{Deserialize, Serialize};

/// Where rendered dbt tasks execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// dbt runs in the worker process
    Local,

    /// dbt runs inside a managed virtualenv
    Virtualenv,

    /// dbt runs inside a container
    Docker,

    /// dbt runs as a Kubernetes pod
    Kubernetes,
}

impl ExecutionMode {
    /// Get the execution mode as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Virtualenv => "virtualenv",
            Self::Docker => "docker",
            Self::Kubernetes => "kubernetes",
        }
    }

    /// CamelCase suffix used when deriving operator class names
    pub fn operator_suffix(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Virtualenv => "Virtualenv",
            Self::Docker => "Docker",
            Self::Kubernetes => "Kubernetes",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How test nodes are rendered alongside their models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestBehavior {
    /// Do not render test tasks at all
    None,

    /// Render one test task after each model
    #[default]
    AfterEach,

    /// Render a single aggregate test task after the whole graph
    AfterAll,
}

/// dbt's --indirect-selection flag, forwarded to test task arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestIndirectSelection {
    /// The dbt default - adds no argument
    #[default]
    Eager,

    Cautious,

    Buildable,

    Empty,
}

impl TestIndirectSelection {
    /// Get the selection mode as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Cautious => "cautious",
            Self::Buildable => "buildable",
            Self::Empty => "empty",
        }
    }
}

/// Resource kind of a dbt graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbtResourceType {
    Model,

    Test,

    Seed,

    Snapshot,

    Source,

    /// Resource types this version does not know about. Foreign manifests
    /// must never fail to parse on an unrecognized kind.
    #[serde(other)]
    Unknown,
}

impl DbtResourceType {
    /// Get the resource type as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Test => "test",
            Self::Seed => "seed",
            Self::Snapshot => "snapshot",
            Self::Source => "source",
            Self::Unknown => "unknown",
        }
    }

    /// Whether nodes of this type translate into runnable tasks
    pub fn is_executable(&self) -> bool {
        matches!(self, Self::Model | Self::Test | Self::Seed | Self::Snapshot)
    }
}

impl std::fmt::Display for DbtResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
