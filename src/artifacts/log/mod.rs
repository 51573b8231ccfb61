//! Commit history traversal
//!
//! History is linear: every commit names at most one parent. [`rev_list::RevList`] walks
//! from a starting commit back to the root and reports a dangling parent link as
//! [`crate::artifacts::core::error::KitError::BrokenChain`] instead of stopping quietly.

pub mod rev_list;
