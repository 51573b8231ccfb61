//! Object types and framing
//!
//! All content is stored as objects identified by the SHA-1 of their framed bytes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, names and object IDs)
//! - **Commit**: Snapshot with metadata (tree, optional parent, author, message)
//!
//! Every object is framed as `<type> <size>\0<payload>` before hashing and storing.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
