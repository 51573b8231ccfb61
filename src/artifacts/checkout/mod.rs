//! Checkout planning
//!
//! A checkout is prepared in full before the working directory is touched: every blob of
//! the target tree is loaded into a [`migration::Migration`] first, so a missing or
//! corrupt object aborts the checkout while the user's files are still intact.

pub mod migration;
