//! Staging index file format
//!
//! The index is a plain text file with one record per staged path, sorted by path:
//!
//! ```text
//! <40-hex object id> <repository-relative path>\n
//! ```
//!
//! Paths use `/` separators and never start with `./`. The whole file is rewritten on
//! every save.

pub mod index_entry;
