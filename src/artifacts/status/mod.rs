//! Working tree status inspection
//!
//! - `inspector`: hashes working files and compares them with the index or HEAD
//! - `status_info`: the resulting path sets and their printable forms

pub mod inspector;
pub mod status_info;
