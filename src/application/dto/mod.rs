//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{CreatePrefabRequest, NewPrefabFields, PrefabFields, UpdatePrefabRequest};
pub use response::PrefabResponse;
