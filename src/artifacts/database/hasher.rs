use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

/// SHA-1 of `bytes` as a 40-character lowercase hex object id.
pub fn digest(bytes: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(bytes);

    ObjectId::from_digest(&hasher.finalize())
}
