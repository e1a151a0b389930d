//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **PrefabService**: Retrieve, update, delete and create prefabs

pub mod prefab_service;

pub use prefab_service::{
    CreatePrefabDto, PrefabError, PrefabService, PrefabServiceImpl, UpdatePrefabDto,
};
