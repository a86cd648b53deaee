//! Databricks client-credentials profile mapping
//!
//! Claims connections of type "databricks" that authenticate with an OAuth
//! client id/secret pair. The warehouse endpoint comes from the connection's
//! `extra` mapping (`http_path`); the target schema from the profile
//! arguments.

use std::collections::BTreeMap;

use crate::connection::Connection;
use crate::mapping::ProfileMapping;

const CLIENT_ID_ENV_VAR: &str = "SKYFORM_CONN_DATABRICKS_CLIENT_ID";
const CLIENT_SECRET_ENV_VAR: &str = "SKYFORM_CONN_DATABRICKS_CLIENT_SECRET";

/// Profile mapping for Databricks OAuth client credentials
#[derive(Debug, Clone)]
pub struct DatabricksClientProfileMapping {
    connection: Connection,

    profile_args: serde_json::Map<String, serde_json::Value>,

    /// Connection `extra`, parsed once at construction
    extra: serde_json::Map<String, serde_json::Value>,
}

impl DatabricksClientProfileMapping {
    pub fn new(
        connection: Connection,
        profile_args: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let extra = connection.parsed_extra();
        Self {
            connection,
            profile_args,
            extra,
        }
    }

    /// Workspace host with any scheme prefix stripped, as dbt expects it
    fn host(&self) -> &str {
        self.connection
            .host
            .trim_start_matches("https://")
            .trim_start_matches("http://")
    }

    fn http_path(&self) -> &str {
        self.extra
            .get("http_path")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    /// Schema for claiming comes from profile args only; the connection's
    /// schema field is just a fallback for profile generation.
    fn schema_arg(&self) -> &str {
        self.profile_args
            .get("schema")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    fn schema(&self) -> &str {
        let arg = self.schema_arg();
        if !arg.is_empty() {
            return arg;
        }
        self.connection.schema.as_deref().unwrap_or("")
    }
}

impl ProfileMapping for DatabricksClientProfileMapping {
    fn profile_type(&self) -> &'static str {
        "databricks"
    }

    fn can_claim_connection(&self) -> bool {
        self.connection.conn_type == "databricks"
            && !self.connection.host.is_empty()
            && !self.connection.login.is_empty()
            && !self.connection.password.is_empty()
            && !self.http_path().is_empty()
            && !self.schema_arg().is_empty()
    }

    fn profile(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut profile = serde_json::Map::new();
        profile.insert("type".to_string(), self.profile_type().into());
        profile.insert("host".to_string(), self.host().into());
        profile.insert("schema".to_string(), self.schema().into());
        profile.insert("http_path".to_string(), self.http_path().into());
        profile.insert("auth_type".to_string(), "oauth".into());
        profile.insert(
            "client_id".to_string(),
            format!("{{{{ env_var('{CLIENT_ID_ENV_VAR}') }}}}").into(),
        );
        profile.insert(
            "client_secret".to_string(),
            format!("{{{{ env_var('{CLIENT_SECRET_ENV_VAR}') }}}}").into(),
        );

        // Profile args override everything derived from the connection.
        for (key, value) in &self.profile_args {
            profile.insert(key.clone(), value.clone());
        }
        profile
    }

    fn env_vars(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CLIENT_ID_ENV_VAR.to_string(), self.connection.login.clone()),
            (
                CLIENT_SECRET_ENV_VAR.to_string(),
                self.connection.password.clone(),
            ),
        ])
    }
}
