//! Prefab access evaluation domain service.

use crate::domain::entities::Prefab;
use crate::domain::value_objects::AuthorizationLevel;

/// Operations that can be performed on a single prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefabOperation {
    Read,
    Update,
    Delete,
}

impl PrefabOperation {
    /// Minimum authorization level the operation requires.
    pub fn required_level(self) -> AuthorizationLevel {
        match self {
            PrefabOperation::Read => AuthorizationLevel::View,
            PrefabOperation::Update => AuthorizationLevel::Edit,
            PrefabOperation::Delete => AuthorizationLevel::Own,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefabOperation::Read => "read",
            PrefabOperation::Update => "update",
            PrefabOperation::Delete => "delete",
        }
    }
}

/// Reason an access check failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("No authorization for prefab")]
    NoAuthorization,

    #[error("Authorization level {held} is below required {required}")]
    InsufficientLevel {
        held: AuthorizationLevel,
        required: AuthorizationLevel,
    },

    #[error("Caller is not the prefab owner")]
    NotOwner,
}

/// Domain service deciding whether a caller may operate on a prefab.
pub struct AccessService;

impl AccessService {
    /// Check that `prefab` grants `operation` on `prefab_id` to `caller_id`.
    ///
    /// Looks up the entry for `prefab_id` in the record's authorizations and
    /// compares it against the operation's minimum. Deletion additionally
    /// requires the caller to be the record owner.
    pub fn authorize(
        prefab: &Prefab,
        prefab_id: &str,
        caller_id: &str,
        operation: PrefabOperation,
    ) -> Result<AuthorizationLevel, AccessDenied> {
        let held = prefab
            .authorization_level(prefab_id)
            .ok_or(AccessDenied::NoAuthorization)?;

        let required = operation.required_level();
        if !held.grants(required) {
            return Err(AccessDenied::InsufficientLevel { held, required });
        }

        if operation == PrefabOperation::Delete && !prefab.is_owner(caller_id) {
            return Err(AccessDenied::NotOwner);
        }

        Ok(held)
    }
}
