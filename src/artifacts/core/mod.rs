//! Shared types used across the areas and artifacts
//!
//! - `error`: Typed error taxonomy surfaced by every repository operation

pub mod error;
