//! Prefab authorization levels and entries.
//!
//! Levels form a total order: `VIEW < EDIT < OWN`. Holding a level grants
//! every operation that requires that level or any lower one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege a caller holds on a single prefab.
///
/// Variant order is significant: the derived `Ord` is the privilege order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizationLevel {
    /// Read-only access
    View,
    /// Read and modify
    Edit,
    /// Full control, including deletion
    Own,
}

impl AuthorizationLevel {
    /// Check whether this level satisfies a required minimum.
    pub fn grants(self, required: AuthorizationLevel) -> bool {
        self >= required
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationLevel::View => "VIEW",
            AuthorizationLevel::Edit => "EDIT",
            AuthorizationLevel::Own => "OWN",
        }
    }
}

impl fmt::Display for AuthorizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single authorization entry: a level held on one prefab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub prefab_id: String,
    pub authorization_level: AuthorizationLevel,
}

impl Authorization {
    pub fn new(prefab_id: impl Into<String>, level: AuthorizationLevel) -> Self {
        Self {
            prefab_id: prefab_id.into(),
            authorization_level: level,
        }
    }
}

/// Find the level granted for `prefab_id` in a list of entries.
///
/// The first matching entry wins.
pub fn level_for(authorizations: &[Authorization], prefab_id: &str) -> Option<AuthorizationLevel> {
    authorizations
        .iter()
        .find(|a| a.prefab_id == prefab_id)
        .map(|a| a.authorization_level)
}
