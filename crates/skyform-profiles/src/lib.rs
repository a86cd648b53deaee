//! Connection → dbt profile mapping
//!
//! This crate handles:
//! - The orchestrator connection value object
//! - Profile mappings that claim connections and generate profiles.yml
//!   targets (secrets referenced through env vars, never inlined)
//! - Automatic mapper lookup (first claim wins)

pub mod connection;
pub mod databricks;
pub mod mapping;

pub use connection::Connection;
pub use databricks::DatabricksClientProfileMapping;
pub use mapping::{profile_file_contents, ProfileError, ProfileMapping};

/// Find the profile mapping that claims a connection
///
/// Candidate mappers are tried in registration order; the first to claim the
/// connection wins. Returns `None` when no mapper claims it - callers decide
/// whether that is an error.
pub fn automatic_profile_mapping(
    connection: &Connection,
    profile_args: &serde_json::Map<String, serde_json::Value>,
) -> Option<Box<dyn ProfileMapping>> {
    let candidates: Vec<Box<dyn ProfileMapping>> = vec![Box::new(
        DatabricksClientProfileMapping::new(connection.clone(), profile_args.clone()),
    )];

    candidates
        .into_iter()
        .find(|mapping| mapping.can_claim_connection())
}
