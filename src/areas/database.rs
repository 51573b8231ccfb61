//! Content-addressed object store
//!
//! Objects live under `.kit/objects/<first-2-hex>/<remaining-38-hex>`. Each file
//! holds a [`StoredObject`]: a storage flag byte plus the raw or zlib-compressed
//! framed bytes. Objects are immutable; storing an id that already exists is a
//! no-op, so concurrent writers of the same content cannot disagree.

use crate::artifacts::core::error::KitError;
use crate::artifacts::database::hasher;
use crate::artifacts::database::stored_object::StoredObject;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, RawObject};
use crate::artifacts::objects::object_id::{MIN_ABBREVIATION_LENGTH, ObjectId};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Frame, hash and persist an object, returning its id
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let framed = object.serialize()?;

        self.store_bytes(&framed)
    }

    /// Persist already-framed bytes under the digest of those bytes
    pub fn store_bytes(&self, framed: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = hasher::digest(framed);
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::trace!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).map_err(|e| KitError::io(object_dir, e))?;

        let stored = StoredObject::encode(framed);
        self.write_object(&object_path, &stored.to_bytes())?;
        tracing::debug!(oid = %object_id, flag = ?stored.flag(), size = framed.len(), "stored object");

        Ok(object_id)
    }

    /// Load the framed bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        let content = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(KitError::not_found(format!("object {}", object_id)).into());
            }
            Err(e) => return Err(KitError::io(object_path, e).into()),
        };

        let framed = StoredObject::parse(content.into())
            .and_then(StoredObject::into_framed)
            .map_err(|e| KitError::corrupt(object_id, format!("{:#}", e)))?;

        if hasher::digest(&framed) != *object_id {
            return Err(KitError::corrupt(object_id, "content does not match its object id").into());
        }
        tracing::trace!(oid = %object_id, size = framed.len(), "loaded object");

        Ok(framed)
    }

    /// Load an object and split its framing header from the payload
    pub fn load_raw(&self, object_id: &ObjectId) -> anyhow::Result<RawObject> {
        let framed = self.load(object_id)?;

        RawObject::parse(framed)
            .map_err(|e| KitError::corrupt(object_id, format!("{:#}", e)).into())
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        Ok(self.load_raw(object_id)?.object_type)
    }

    pub fn object_size(&self, object_id: &ObjectId) -> anyhow::Result<usize> {
        Ok(self.load_raw(object_id)?.size())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        self.load_raw(object_id)?
            .into_object()
            .map_err(|e| KitError::corrupt(object_id, format!("{:#}", e)).into())
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            other => Err(Self::type_mismatch(object_id, ObjectType::Blob, &other)),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        match self.parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(*tree),
            other => Err(Self::type_mismatch(object_id, ObjectType::Tree, &other)),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            other => Err(Self::type_mismatch(object_id, ObjectType::Commit, &other)),
        }
    }

    /// Load a commit named by the user; a non-commit object is an invalid argument
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            other => Err(KitError::invalid_argument(format!(
                "object {} is a {}, not a commit",
                object_id,
                other.object_type()
            ))
            .into()),
        }
    }

    fn type_mismatch(
        object_id: &ObjectId,
        expected: ObjectType,
        found: &ObjectBox,
    ) -> anyhow::Error {
        KitError::corrupt(
            object_id,
            format!("expected {}, found {}", expected, found.object_type()),
        )
        .into()
    }

    /// Resolve a full or abbreviated object id to a stored object
    pub fn resolve(&self, reference: &str) -> anyhow::Result<ObjectId> {
        let reference = reference.trim().to_ascii_lowercase();

        if !ObjectId::is_hex(&reference) || reference.len() > OBJECT_ID_LENGTH {
            return Err(KitError::invalid_argument(format!(
                "malformed object reference {:?}",
                reference
            ))
            .into());
        }

        if reference.len() == OBJECT_ID_LENGTH {
            let object_id = ObjectId::try_parse(reference)?;
            if !self.exists(&object_id) {
                return Err(KitError::not_found(format!("object {}", object_id)).into());
            }
            return Ok(object_id);
        }

        if reference.len() < MIN_ABBREVIATION_LENGTH {
            return Err(KitError::invalid_argument(format!(
                "object reference {:?} is shorter than {} characters",
                reference, MIN_ABBREVIATION_LENGTH
            ))
            .into());
        }

        let mut matches = self.find_objects_by_prefix(&reference)?;
        match matches.len() {
            0 => Err(KitError::not_found(format!("object {}", reference)).into()),
            1 => Ok(matches.remove(0)),
            _ => Err(KitError::invalid_argument(format!(
                "short object id {} is ambiguous:\n{}",
                reference,
                matches
                    .iter()
                    .map(|oid| format!("\t{}", oid))
                    .collect::<Vec<_>>()
                    .join("\n")
            ))
            .into()),
        }
    }

    /// Find all objects whose id starts with the given prefix (2+ characters)
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();
        if prefix.len() < 2 {
            return Ok(matches);
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path).map_err(|e| KitError::io(&dir_path, e))? {
                let entry = entry.map_err(|e| KitError::io(&dir_path, e))?;
                let file_name = entry.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{}{}", dir_name, file_name))
                {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(|e| KitError::io(&temp_object_path, e))?;

        file.write_all(object_content)
            .map_err(|e| KitError::io(&temp_object_path, e))?;
        drop(file);

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_object_path);
            KitError::io(object_path, e)
        })?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
