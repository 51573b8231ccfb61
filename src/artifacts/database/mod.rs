//! Object database primitives
//!
//! - `hasher`: SHA-1 digest producing object identifiers
//! - `compression`: zlib compression of stored objects
//! - `stored_object`: On-disk record (storage flag + body)
//! - `database_entry`: Tree entry as read back from the database

pub mod compression;
pub mod database_entry;
pub mod hasher;
pub mod stored_object;
