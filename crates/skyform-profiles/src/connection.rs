//! Orchestrator connection model
//!
//! A read-only credentials bundle handed to profile mappings by the
//! embedding application's connection registry. Mappings never mutate it.

use serde::{Deserialize, Serialize};

/// External-system connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Registry identifier of the connection
    #[serde(default)]
    pub conn_id: String,

    /// Connection-type tag (e.g. "databricks", "postgres")
    #[serde(default)]
    pub conn_type: String,

    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub login: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub schema: Option<String>,

    /// Backend-specific settings as a serialized JSON mapping
    #[serde(default)]
    pub extra: String,
}

impl Connection {
    /// Parse `extra` into a mapping
    ///
    /// Parsed once at the mapping boundary. An empty, unparsable, or
    /// non-mapping payload yields an empty map so claim checks fail closed
    /// instead of erroring out of a registry scan.
    pub fn parsed_extra(&self) -> serde_json::Map<String, serde_json::Value> {
        if self.extra.is_empty() {
            return serde_json::Map::new();
        }
        match serde_json::from_str::<serde_json::Value>(&self.extra) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!(
                    conn_id = %self.conn_id,
                    "connection extra is not a JSON mapping; treating as empty"
                );
                serde_json::Map::new()
            }
        }
    }
}
