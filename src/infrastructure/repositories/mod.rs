//! Repository Implementations
//!
//! Concrete implementations of the domain `PrefabRepository` trait.
//!
//! - **PgPrefabRepository** - PostgreSQL, cascade deletes run in one transaction
//! - **InMemoryPrefabRepository** - process-local, cascade deletes run under one lock
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prefab_api::domain::PrefabRepository;
//! use prefab_api::infrastructure::repositories::PgPrefabRepository;
//!
//! let prefabs: Arc<dyn PrefabRepository> = Arc::new(PgPrefabRepository::new(pool));
//! ```

pub mod memory_repository;
pub mod prefab_repository;

pub use memory_repository::InMemoryPrefabRepository;
pub use prefab_repository::PgPrefabRepository;

use crate::shared::error::AppError;

/// Error for a cascade plan that no longer matches the stored prefab.
pub(crate) fn stale_plan(id: &str) -> AppError {
    AppError::Internal(format!(
        "Cascade plan for prefab {} is out of date with its references",
        id
    ))
}
