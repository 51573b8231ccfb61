//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They are the digest
//! of an object's framed bytes and double as its address in the object store.
//!
//! ## Storage
//!
//! Objects are stored in `.kit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::fmt::Write;
use std::path::PathBuf;

/// Minimum length accepted for an abbreviated object id
pub const MIN_ABBREVIATION_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full object id
    ///
    /// Uppercase hex digits are accepted and normalised to lowercase.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(KitError::invalid_argument(format!(
                "invalid object id length {}: {:?}",
                id.len(),
                id
            ))
            .into());
        }
        if !Self::is_hex(&id) {
            return Err(
                KitError::invalid_argument(format!("invalid object id characters: {:?}", id))
                    .into(),
            );
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Render raw digest bytes as an id
    pub fn from_digest(digest: &[u8]) -> Self {
        let hex = digest.iter().fold(
            String::with_capacity(digest.len() * 2),
            |mut hex, byte| {
                let _ = write!(hex, "{:02x}", byte);
                hex
            },
        );

        Self(hex)
    }

    pub fn is_hex(value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Split the hash as `XX/YYYYYY...` for the fan-out layout
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
