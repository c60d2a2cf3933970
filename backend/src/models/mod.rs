//! Database models for the Workshop Sales Management Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
