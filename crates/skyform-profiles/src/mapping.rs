//! Profile mapping trait and profiles.yml rendering

use std::collections::BTreeMap;

/// Maps one orchestrator connection type onto a dbt connection profile
///
/// One implementation per backend. The registry scan relies on
/// `can_claim_connection` being side-effect free and never failing: a
/// mapping handed garbage declines the connection instead of erroring.
pub trait ProfileMapping {
    /// dbt profile `type` this mapping produces (e.g. "databricks")
    fn profile_type(&self) -> &'static str;

    /// Whether this mapping is the correct handler for its connection
    fn can_claim_connection(&self) -> bool;

    /// profiles.yml target mapping
    ///
    /// Secret values are referenced as `{{ env_var('...') }}` strings and
    /// never inlined; the matching values come from [`Self::env_vars`].
    fn profile(&self) -> serde_json::Map<String, serde_json::Value>;

    /// Secret values keyed by the env-var names the profile references
    fn env_vars(&self) -> BTreeMap<String, String>;
}

/// Render a complete profiles.yml document for one mapping
///
/// ```yaml
/// <profile_name>:
///   target: <target>
///   outputs:
///     <target>: { ...profile()... }
/// ```
pub fn profile_file_contents(
    mapping: &dyn ProfileMapping,
    profile_name: &str,
    target: &str,
) -> Result<String, ProfileError> {
    let document = serde_json::json!({
        profile_name: {
            "target": target,
            "outputs": {
                target: serde_json::Value::Object(mapping.profile()),
            },
        },
    });

    serde_yaml::to_string(&document).map_err(ProfileError::Render)
}

/// Profile generation errors
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to render profiles.yml: {0}")]
    Render(#[from] serde_yaml::Error),
}
