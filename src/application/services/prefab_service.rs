//! Prefab Service
//!
//! Handles retrieval, update, deletion and creation of prefabs, gated by
//! the authorization entries carried on each record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    AccessDenied, AccessService, Authorization, AuthorizationLevel, Prefab, PrefabOperation,
    PrefabRepository,
};
use crate::shared::error::AppError;

/// Prefab service trait
#[async_trait]
pub trait PrefabService: Send + Sync {
    /// Get a prefab the caller may view
    async fn get_prefab(&self, prefab_id: &str, caller_id: &str) -> Result<Prefab, PrefabError>;

    /// Update a prefab the caller may edit
    async fn update_prefab(
        &self,
        prefab_id: &str,
        caller_id: &str,
        update: UpdatePrefabDto,
    ) -> Result<Prefab, PrefabError>;

    /// Delete a prefab the caller owns, detaching it from topologies and experiments
    async fn delete_prefab(&self, prefab_id: &str, caller_id: &str) -> Result<Prefab, PrefabError>;

    /// Create a prefab owned by the caller
    async fn create_prefab(&self, caller_id: &str, request: CreatePrefabDto) -> Result<Prefab, PrefabError>;
}

/// Create prefab request
#[derive(Debug, Clone)]
pub struct CreatePrefabDto {
    pub name: String,
    pub rack: Option<serde_json::Value>,
}

/// Update prefab request
#[derive(Debug, Clone)]
pub struct UpdatePrefabDto {
    pub name: String,
    pub rack: Option<serde_json::Value>,
}

/// Prefab service errors
#[derive(Debug, thiserror::Error)]
pub enum PrefabError {
    #[error("Prefab not found")]
    NotFound,

    #[error("Forbidden from accessing prefab: {0}")]
    Forbidden(#[from] AccessDenied),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PrefabError {
    /// Short label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            PrefabError::NotFound => "not_found",
            PrefabError::Forbidden(_) => "forbidden",
            PrefabError::Internal(_) => "error",
        }
    }
}

impl From<AppError> for PrefabError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => PrefabError::NotFound,
            e => PrefabError::Internal(e.to_string()),
        }
    }
}

impl From<PrefabError> for AppError {
    fn from(err: PrefabError) -> Self {
        match err {
            PrefabError::NotFound => AppError::NotFound("Prefab not found.".into()),
            PrefabError::Forbidden(_) => {
                AppError::Forbidden("Forbidden from retrieving/editing prefab.".into())
            }
            PrefabError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// PrefabService implementation
pub struct PrefabServiceImpl<R>
where
    R: PrefabRepository + ?Sized,
{
    prefab_repo: Arc<R>,
}

impl<R> PrefabServiceImpl<R>
where
    R: PrefabRepository + ?Sized,
{
    pub fn new(prefab_repo: Arc<R>) -> Self {
        Self { prefab_repo }
    }

    /// Fetch the record and check the caller may perform `operation` on it.
    async fn load_authorized(
        &self,
        prefab_id: &str,
        caller_id: &str,
        operation: PrefabOperation,
    ) -> Result<Prefab, PrefabError> {
        let prefab = self
            .prefab_repo
            .find_by_id(prefab_id)
            .await?
            .ok_or(PrefabError::NotFound)?;

        if let Err(denied) = AccessService::authorize(&prefab, prefab_id, caller_id, operation) {
            tracing::debug!(
                prefab_id = %prefab_id,
                caller_id = %caller_id,
                operation = operation.as_str(),
                reason = %denied,
                "Prefab access denied"
            );
            return Err(denied.into());
        }

        Ok(prefab)
    }
}

#[async_trait]
impl<R> PrefabService for PrefabServiceImpl<R>
where
    R: PrefabRepository + ?Sized + 'static,
{
    async fn get_prefab(&self, prefab_id: &str, caller_id: &str) -> Result<Prefab, PrefabError> {
        self.load_authorized(prefab_id, caller_id, PrefabOperation::Read)
            .await
    }

    async fn update_prefab(
        &self,
        prefab_id: &str,
        caller_id: &str,
        update: UpdatePrefabDto,
    ) -> Result<Prefab, PrefabError> {
        let mut prefab = self
            .load_authorized(prefab_id, caller_id, PrefabOperation::Update)
            .await?;

        prefab.name = update.name;
        if let Some(rack) = update.rack {
            prefab.rack = Some(rack);
        }
        prefab.datetime_last_edited = Utc::now();

        let updated = self.prefab_repo.update(&prefab).await?;

        tracing::info!(prefab_id = %prefab_id, caller_id = %caller_id, "Prefab updated");

        Ok(updated)
    }

    async fn delete_prefab(&self, prefab_id: &str, caller_id: &str) -> Result<Prefab, PrefabError> {
        let prefab = self
            .load_authorized(prefab_id, caller_id, PrefabOperation::Delete)
            .await?;

        let plan = prefab.cascade_plan();

        let removed = self
            .prefab_repo
            .delete_cascade(prefab_id, &plan)
            .await
            .map_err(|e| {
                tracing::error!(
                    prefab_id = %prefab_id,
                    steps = plan.len(),
                    error = %e,
                    "Cascade delete failed"
                );
                PrefabError::from(e)
            })?
            .ok_or(PrefabError::NotFound)?;

        tracing::info!(
            prefab_id = %prefab_id,
            caller_id = %caller_id,
            detached = plan.len(),
            "Prefab deleted"
        );

        Ok(removed)
    }

    async fn create_prefab(&self, caller_id: &str, request: CreatePrefabDto) -> Result<Prefab, PrefabError> {
        let now = Utc::now();
        let prefab_id = Uuid::new_v4().to_string();

        let prefab = Prefab {
            authorizations: vec![Authorization::new(prefab_id.clone(), AuthorizationLevel::Own)],
            id: prefab_id,
            name: request.name,
            owner_id: caller_id.to_string(),
            topology_ids: Vec::new(),
            experiment_ids: Vec::new(),
            rack: request.rack,
            datetime_created: now,
            datetime_last_edited: now,
        };

        let created = self.prefab_repo.create(&prefab).await?;

        tracing::info!(prefab_id = %created.id, caller_id = %caller_id, "Prefab created");

        Ok(created)
    }
}
