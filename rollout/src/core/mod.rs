//! Deterministic, pure logic shared by the rollout crate.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod attr_dict;
pub mod errors;
pub mod nested;
pub mod recursive_map;
pub mod resolver;
pub mod signature;
