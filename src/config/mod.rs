//! Configuration for the `aimg` tool
//!
//! Provides types and loading for `aimg.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
