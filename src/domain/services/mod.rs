//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **AccessService**: Authorization checks for prefab operations

mod access_service;

pub use access_service::*;
