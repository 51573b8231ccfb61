//! The HEAD pointer
//!
//! `HEAD` is a single text file holding the 40-character id of the current commit, or
//! nothing before the first commit. It only moves through commit and checkout, both of
//! which hold the repository lock.

use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the storage directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    /// Current commit, or `None` when no commit has been made yet
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let head_path = self.head_path();

        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KitError::io(head_path, e).into()),
        };
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|_| {
                KitError::corrupt_file(&head_path, format!("{:?} is not an object id", content))
                    .into()
            })
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let head_path = self.head_path();
        let temp_path = self
            .path
            .join(format!("{}-{}.tmp", HEAD_REF_NAME, rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| KitError::io(&temp_path, e))?;
        writeln!(file, "{}", oid).map_err(|e| KitError::io(&temp_path, e))?;
        drop(file);

        std::fs::rename(&temp_path, &head_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            KitError::io(&head_path, e)
        })?;
        tracing::debug!(oid = %oid, "moved HEAD");

        Ok(())
    }
}
