//! Command implementations
//!
//! Every command is an `impl Repository` block writing its output to the repository's
//! writer:
//!
//! - `plumbing`: direct object store access (hash-object, cat-file, write-tree, ls-tree)
//! - `porcelain`: user workflows (init, add, commit, status, diff, log, show, checkout)

pub mod plumbing;
pub mod porcelain;
