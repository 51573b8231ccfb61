use crate::areas::repository::Repository;
use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the blob id of `object_path`, storing the blob when `write` is set
    pub fn hash_object(&self, object_path: &Path, write: bool) -> anyhow::Result<ObjectId> {
        let file_path = self.path().join(object_path);
        let data = std::fs::read(&file_path).map_err(|e| KitError::io(object_path, e))?;
        let blob = Blob::new(Bytes::from(data));

        let object_id = if write {
            let _lock = self.lock()?;
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
