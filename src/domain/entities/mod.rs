//! # Domain Entities
//!
//! Core domain entities representing the business objects of the service.
//!
//! - **Prefab**: A reusable rack definition, shareable through authorizations
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer.

mod prefab;

pub use prefab::{CascadePlan, CleanupStep, Prefab, PrefabRepository};
