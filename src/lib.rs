//! # Prefab API Library
//!
//! HTTP service for prefabs: reusable rack definitions owned by a user and
//! shared with others through per-prefab authorization levels
//! (`VIEW < EDIT < OWN`).
//!
//! ## Architecture
//!
//! - **Domain Layer**: `Prefab` entity, authorization levels, access rules, repository trait
//! - **Application Layer**: `PrefabService` and request/response DTOs
//! - **Infrastructure Layer**: PostgreSQL and in-memory repositories, metrics
//! - **Presentation Layer**: axum routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! prefab_api/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, access rules
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes, handlers, middleware
//! +-- shared/         Error types and validation helpers
//! ```

pub mod config;
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod shared;

// Application startup and state management
pub mod startup;

// Logging setup
pub mod telemetry;
