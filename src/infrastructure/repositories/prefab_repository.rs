//! Prefab Repository Implementation
//!
//! PostgreSQL implementation of the PrefabRepository trait.
//! Authorization entries are stored as JSONB; back-references to topologies
//! and experiments are `TEXT[]` columns on both sides.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::{Authorization, CascadePlan, CleanupStep, Prefab, PrefabRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use super::stale_plan;

const PREFAB_COLUMNS: &str = "id, name, owner_id, authorizations, topology_ids, experiment_ids, \
                              rack, datetime_created, datetime_last_edited";

/// Database row representation of the prefabs table.
#[derive(Debug, sqlx::FromRow)]
struct PrefabRow {
    id: String,
    name: String,
    owner_id: String,
    authorizations: Json<Vec<Authorization>>,
    topology_ids: Vec<String>,
    experiment_ids: Vec<String>,
    rack: Option<serde_json::Value>,
    datetime_created: DateTime<Utc>,
    datetime_last_edited: DateTime<Utc>,
}

impl PrefabRow {
    fn into_prefab(self) -> Prefab {
        Prefab {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            authorizations: self.authorizations.0,
            topology_ids: self.topology_ids,
            experiment_ids: self.experiment_ids,
            rack: self.rack,
            datetime_created: self.datetime_created,
            datetime_last_edited: self.datetime_last_edited,
        }
    }
}

/// PostgreSQL prefab repository implementation.
#[derive(Clone)]
pub struct PgPrefabRepository {
    pool: PgPool,
}

impl PgPrefabRepository {
    /// Create a new PgPrefabRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrefabRepository for PgPrefabRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Prefab>, AppError> {
        let started = Instant::now();

        let row = sqlx::query_as::<_, PrefabRow>(&format!(
            "SELECT {} FROM prefabs WHERE id = $1",
            PREFAB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        metrics::record_db_query("select", "prefabs", started.elapsed().as_secs_f64());

        Ok(row.map(PrefabRow::into_prefab))
    }

    async fn create(&self, prefab: &Prefab) -> Result<Prefab, AppError> {
        let started = Instant::now();

        let row = sqlx::query_as::<_, PrefabRow>(&format!(
            r#"
            INSERT INTO prefabs (id, name, owner_id, authorizations, topology_ids, experiment_ids,
                                 rack, datetime_created, datetime_last_edited)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PREFAB_COLUMNS
        ))
        .bind(&prefab.id)
        .bind(&prefab.name)
        .bind(&prefab.owner_id)
        .bind(Json(&prefab.authorizations))
        .bind(&prefab.topology_ids)
        .bind(&prefab.experiment_ids)
        .bind(&prefab.rack)
        .bind(prefab.datetime_created)
        .bind(prefab.datetime_last_edited)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest(format!("Prefab with id {} already exists", prefab.id))
            }
            _ => AppError::Database(e),
        })?;

        metrics::record_db_query("insert", "prefabs", started.elapsed().as_secs_f64());

        Ok(row.into_prefab())
    }

    async fn update(&self, prefab: &Prefab) -> Result<Prefab, AppError> {
        let started = Instant::now();

        let row = sqlx::query_as::<_, PrefabRow>(&format!(
            r#"
            UPDATE prefabs
            SET name = $2, rack = $3, authorizations = $4, datetime_last_edited = $5
            WHERE id = $1
            RETURNING {}
            "#,
            PREFAB_COLUMNS
        ))
        .bind(&prefab.id)
        .bind(&prefab.name)
        .bind(&prefab.rack)
        .bind(Json(&prefab.authorizations))
        .bind(prefab.datetime_last_edited)
        .fetch_optional(&self.pool)
        .await?;

        metrics::record_db_query("update", "prefabs", started.elapsed().as_secs_f64());

        row.map(PrefabRow::into_prefab)
            .ok_or_else(|| AppError::NotFound(format!("Prefab with id {} not found", prefab.id)))
    }

    /// Detach every reference in `plan` and delete the prefab in one transaction.
    ///
    /// The prefab row is locked first. A plan that no longer matches the
    /// locked row rolls everything back.
    async fn delete_cascade(&self, id: &str, plan: &CascadePlan) -> Result<Option<Prefab>, AppError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PrefabRow>(&format!(
            "SELECT {} FROM prefabs WHERE id = $1 FOR UPDATE",
            PREFAB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .map(PrefabRow::into_prefab);

        let Some(current) = current else {
            return Ok(None);
        };

        // Dropping the transaction on an early return rolls it back.
        if !plan.matches(&current) {
            return Err(stale_plan(id));
        }

        for step in &plan.steps {
            let (table, target) = match step {
                CleanupStep::DetachFromTopology(topology_id) => ("topologies", topology_id),
                CleanupStep::DetachFromExperiment(experiment_id) => ("experiments", experiment_id),
            };

            sqlx::query(&format!(
                "UPDATE {} SET prefab_ids = array_remove(prefab_ids, $2) WHERE id = $1",
                table
            ))
            .bind(target)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let row = sqlx::query_as::<_, PrefabRow>(&format!(
            "DELETE FROM prefabs WHERE id = $1 RETURNING {}",
            PREFAB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        metrics::record_db_query("delete_cascade", "prefabs", started.elapsed().as_secs_f64());

        Ok(row.map(PrefabRow::into_prefab))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
