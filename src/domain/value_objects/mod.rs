//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **AuthorizationLevel**: Ordered privilege `VIEW < EDIT < OWN`
//! - **Authorization**: A level held on a specific prefab

mod authorization;

pub use authorization::*;
