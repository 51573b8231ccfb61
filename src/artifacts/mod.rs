//! Data formats and algorithms
//!
//! - `checkout`: preparing a tree for restoration
//! - `core`: the error taxonomy
//! - `database`: hashing, compression and the on-disk object record
//! - `index`: staging index records
//! - `log`: parent-chain traversal
//! - `objects`: blob, tree and commit encodings
//! - `status`: working tree classification

pub mod checkout;
pub mod core;
pub mod database;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
