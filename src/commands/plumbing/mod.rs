//! Plumbing commands (low-level object operations)
//!
//! Direct access to the object store, mostly useful for scripting and debugging:
//!
//! - `hash-object`: compute a file's blob id and optionally store it
//! - `cat-file`: print an object's content, size or type
//! - `write-tree`: snapshot the working directory as tree objects
//! - `ls-tree`: list the entries of a tree (or of a commit's root tree)

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
