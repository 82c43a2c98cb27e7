//! HTTP handlers for the CityRoute REST API.
//!
//! - `city`: distance submission, path queries and cache control
//! - `health`: liveness check

pub mod city;
pub mod health;
pub mod helpers;

pub use city::{cache_status, delete_distances, find_paths, refresh_cache, submit_distances};
pub use health::health_check;
