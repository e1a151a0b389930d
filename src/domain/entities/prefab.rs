//! Prefab entity and repository trait.
//!
//! A prefab is a reusable, named rack definition owned by one user and
//! shared with others through authorization entries. Topologies and
//! experiments that use a prefab are tracked as back-references so that
//! deleting the prefab can detach them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{level_for, Authorization, AuthorizationLevel};
use crate::shared::error::AppError;

/// Represents a prefab record.
///
/// Serialized with the document field names used on the wire
/// (`_id`, `ownerId`, `topologyIds`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prefab {
    /// Opaque identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// User ID of the creator
    pub owner_id: String,

    /// Authorization entries carried by the record
    pub authorizations: Vec<Authorization>,

    /// Topologies referencing this prefab
    pub topology_ids: Vec<String>,

    /// Experiments referencing this prefab
    pub experiment_ids: Vec<String>,

    /// Rack contents, opaque to this service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack: Option<serde_json::Value>,

    pub datetime_created: DateTime<Utc>,

    pub datetime_last_edited: DateTime<Utc>,
}

impl Prefab {
    /// Check if a user is the owner of this prefab.
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Level granted on `prefab_id` by this record's authorization entries.
    pub fn authorization_level(&self, prefab_id: &str) -> Option<AuthorizationLevel> {
        level_for(&self.authorizations, prefab_id)
    }

    /// Build the ordered cleanup steps needed before this record can be removed.
    ///
    /// Topologies are detached first, then experiments, each in the order
    /// they appear on the record.
    pub fn cascade_plan(&self) -> CascadePlan {
        let steps = self
            .topology_ids
            .iter()
            .cloned()
            .map(CleanupStep::DetachFromTopology)
            .chain(
                self.experiment_ids
                    .iter()
                    .cloned()
                    .map(CleanupStep::DetachFromExperiment),
            )
            .collect();

        CascadePlan { steps }
    }
}

impl Default for Prefab {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            owner_id: String::new(),
            authorizations: Vec::new(),
            topology_ids: Vec::new(),
            experiment_ids: Vec::new(),
            rack: None,
            datetime_created: now,
            datetime_last_edited: now,
        }
    }
}

/// One reference cleanup performed during a cascade delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStep {
    /// Remove the prefab from a topology's prefab list
    DetachFromTopology(String),
    /// Remove the prefab from an experiment's prefab list
    DetachFromExperiment(String),
}

/// Ordered cleanup steps executed before a prefab is deleted.
///
/// Repositories apply the plan atomically together with the delete:
/// either every step and the delete take effect, or none do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    pub steps: Vec<CleanupStep>,
}

impl CascadePlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this plan detaches exactly the references `prefab` holds now.
    ///
    /// A plan built from an older read of the record no longer matches once
    /// a topology or experiment has been attached or detached since.
    pub fn matches(&self, prefab: &Prefab) -> bool {
        prefab.cascade_plan() == *self
    }
}

/// Repository trait for prefab data access operations.
#[async_trait]
pub trait PrefabRepository: Send + Sync {
    /// Find a prefab by its ID.
    async fn find_by_id(&self, id: &str) -> Result<Option<Prefab>, AppError>;

    /// Insert a new prefab.
    async fn create(&self, prefab: &Prefab) -> Result<Prefab, AppError>;

    /// Replace the stored fields of an existing prefab.
    async fn update(&self, prefab: &Prefab) -> Result<Prefab, AppError>;

    /// Apply `plan` and delete the prefab, atomically.
    ///
    /// Returns the removed record, or `None` if it no longer existed.
    async fn delete_cascade(&self, id: &str, plan: &CascadePlan) -> Result<Option<Prefab>, AppError>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
