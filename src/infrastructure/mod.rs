//! Infrastructure Layer
//!
//! Contains implementations for external concerns:
//! - Database pool and migrations (PostgreSQL)
//! - Prefab repositories (PostgreSQL, in-memory)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
