//! # Domain Layer
//!
//! The domain layer contains the core business rules of the prefab service.
//! It is independent of any HTTP or storage concerns.
//!
//! ## Structure
//!
//! - **entities**: The `Prefab` record and its repository trait
//! - **value_objects**: Authorization levels and entries
//! - **services**: Access evaluation for prefab operations

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
