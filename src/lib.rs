//! kit: a minimal content-addressed version control engine
//!
//! - `areas`: the on-disk parts of a repository (object database, index, HEAD,
//!   working directory) and the [`areas::repository::Repository`] context tying them
//!   together
//! - `artifacts`: object formats and the algorithms over them (history walk, status
//!   classification, checkout planning)
//! - `commands`: one `impl Repository` block per CLI command

pub mod areas;
pub mod artifacts;
pub mod commands;
