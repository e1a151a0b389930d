//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::{Authorization, Prefab};

/// Prefab response, using the document field names of the record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefabResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub authorizations: Vec<Authorization>,
    pub topology_ids: Vec<String>,
    pub experiment_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack: Option<serde_json::Value>,
    pub datetime_created: String,
    pub datetime_last_edited: String,
}

impl From<Prefab> for PrefabResponse {
    fn from(prefab: Prefab) -> Self {
        Self {
            id: prefab.id,
            name: prefab.name,
            owner_id: prefab.owner_id,
            authorizations: prefab.authorizations,
            topology_ids: prefab.topology_ids,
            experiment_ids: prefab.experiment_ids,
            rack: prefab.rack,
            datetime_created: prefab.datetime_created.to_rfc3339(),
            datetime_last_edited: prefab.datetime_last_edited.to_rfc3339(),
        }
    }
}
