//! Request DTOs
//!
//! Data structures for API request bodies. Both bodies wrap the prefab
//! fields in a `prefab` object.

use serde::Deserialize;
use validator::Validate;

/// Body of `PUT /prefabs/{id}`.
///
/// Only the shape is checked: `prefab.name` must be present and a string.
/// Any string is accepted as a name, including an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePrefabRequest {
    pub prefab: PrefabFields,
}

/// Client-editable prefab fields
#[derive(Debug, Deserialize)]
pub struct PrefabFields {
    pub name: String,

    #[serde(default)]
    pub rack: Option<serde_json::Value>,
}

/// Body of `POST /prefabs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePrefabRequest {
    #[validate(nested)]
    pub prefab: NewPrefabFields,
}

/// Fields of a prefab being created
#[derive(Debug, Deserialize, Validate)]
pub struct NewPrefabFields {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(default)]
    pub rack: Option<serde_json::Value>,
}
