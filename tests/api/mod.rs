//! REST API endpoint tests

mod health_tests;
mod prefab_tests;
