//! CLI command implementations.

pub mod attrs;
pub mod config;
pub mod transform;
pub mod url;
