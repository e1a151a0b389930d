//! In-memory Prefab Repository
//!
//! Keeps prefabs, topologies and experiments in process memory. Used by the
//! `memory` store backend and by tests that drive the full router.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{CascadePlan, CleanupStep, Prefab, PrefabRepository};
use crate::shared::error::AppError;
use super::stale_plan;

#[derive(Debug, Default)]
struct MemoryState {
    prefabs: HashMap<String, Prefab>,
    /// topology id -> referenced prefab ids
    topologies: HashMap<String, Vec<String>>,
    /// experiment id -> referenced prefab ids
    experiments: HashMap<String, Vec<String>>,
}

/// In-memory prefab repository.
#[derive(Debug, Default)]
pub struct InMemoryPrefabRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryPrefabRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a prefab as-is, replacing any record with the same id.
    pub fn insert(&self, prefab: Prefab) {
        self.state.write().prefabs.insert(prefab.id.clone(), prefab);
    }

    /// Register a topology referencing `prefab_ids`.
    pub fn insert_topology(&self, topology_id: impl Into<String>, prefab_ids: Vec<String>) {
        self.state
            .write()
            .topologies
            .insert(topology_id.into(), prefab_ids);
    }

    /// Register an experiment referencing `prefab_ids`.
    pub fn insert_experiment(&self, experiment_id: impl Into<String>, prefab_ids: Vec<String>) {
        self.state
            .write()
            .experiments
            .insert(experiment_id.into(), prefab_ids);
    }

    pub fn topology_prefab_ids(&self, topology_id: &str) -> Option<Vec<String>> {
        self.state.read().topologies.get(topology_id).cloned()
    }

    pub fn experiment_prefab_ids(&self, experiment_id: &str) -> Option<Vec<String>> {
        self.state.read().experiments.get(experiment_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PrefabRepository for InMemoryPrefabRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Prefab>, AppError> {
        Ok(self.state.read().prefabs.get(id).cloned())
    }

    async fn create(&self, prefab: &Prefab) -> Result<Prefab, AppError> {
        let mut state = self.state.write();
        if state.prefabs.contains_key(&prefab.id) {
            return Err(AppError::BadRequest(format!(
                "Prefab with id {} already exists",
                prefab.id
            )));
        }
        state.prefabs.insert(prefab.id.clone(), prefab.clone());
        Ok(prefab.clone())
    }

    async fn update(&self, prefab: &Prefab) -> Result<Prefab, AppError> {
        let mut state = self.state.write();
        let stored = state
            .prefabs
            .get_mut(&prefab.id)
            .ok_or_else(|| AppError::NotFound(format!("Prefab with id {} not found", prefab.id)))?;

        stored.name = prefab.name.clone();
        stored.rack = prefab.rack.clone();
        stored.authorizations = prefab.authorizations.clone();
        stored.datetime_last_edited = prefab.datetime_last_edited;

        Ok(stored.clone())
    }

    /// Detach and delete under a single write lock.
    ///
    /// The plan is checked against the stored record before anything is
    /// touched, so a rejected plan leaves the store as it was. References to
    /// topologies or experiments that do not exist are skipped.
    async fn delete_cascade(&self, id: &str, plan: &CascadePlan) -> Result<Option<Prefab>, AppError> {
        let mut state = self.state.write();

        match state.prefabs.get(id) {
            None => return Ok(None),
            Some(current) if !plan.matches(current) => return Err(stale_plan(id)),
            Some(_) => {}
        }

        for step in &plan.steps {
            let referenced = match step {
                CleanupStep::DetachFromTopology(topology_id) => state.topologies.get_mut(topology_id),
                CleanupStep::DetachFromExperiment(experiment_id) => {
                    state.experiments.get_mut(experiment_id)
                }
            };

            if let Some(prefab_ids) = referenced {
                prefab_ids.retain(|prefab_id| prefab_id != id);
            }
        }

        Ok(state.prefabs.remove(id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
