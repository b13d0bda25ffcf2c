//! Shared utilities: the crate error type and hash map helpers.

pub mod errors;
pub mod hashers;

pub use errors::{CoreError, Result};
pub use hashers::{create_hash_map, create_hash_map_with_capacity, FastHashMap};
