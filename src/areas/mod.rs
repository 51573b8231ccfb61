//! Core repository components
//!
//! - `database`: content-addressed object store under `.kit/objects`
//! - `index`: staging area mapping paths to blob ids
//! - `lockfile`: exclusive lock held by mutating commands
//! - `refs`: the HEAD pointer
//! - `repository`: the context value bundling all of the above
//! - `workspace`: working directory access and the exclusion predicate

pub mod database;
pub mod index;
pub mod lockfile;
pub mod refs;
pub mod repository;
pub mod workspace;
