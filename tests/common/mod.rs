#![allow(dead_code)]


/// Blob id of the five bytes `hello`
pub const HELLO_BLOB_ID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

/// Object file path for an id: `.kit/objects/xx/yyyy...`
pub fn object_path(dir: &std::path::Path, oid: &str) -> std::path::PathBuf {
    dir.join(".kit").join("objects").join(&oid[..2]).join(&oid[2..])
}

pub fn read_head(dir: &std::path::Path) -> String {
    std::fs::read_to_string(dir.join(".kit").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}
