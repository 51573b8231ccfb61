use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Everything needed to materialise one tree on disk
#[derive(Debug, Default)]
pub struct Migration {
    mkdirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Bytes>,
    index_entries: BTreeMap<PathBuf, ObjectId>,
}

impl Migration {
    /// Load the tree `tree_oid` and every object below it
    pub fn prepare(database: &Database, tree_oid: &ObjectId) -> anyhow::Result<Self> {
        let mut migration = Migration::default();
        migration.load_tree(database, tree_oid, Path::new(""))?;

        tracing::debug!(
            tree = %tree_oid,
            dirs = migration.mkdirs.len(),
            files = migration.files.len(),
            "prepared checkout"
        );

        Ok(migration)
    }

    fn load_tree(
        &mut self,
        database: &Database,
        tree_oid: &ObjectId,
        prefix: &Path,
    ) -> anyhow::Result<()> {
        let tree = database
            .parse_object_as_tree(tree_oid)
            .with_context(|| format!("Failed to load tree for {}", display_dir(prefix)))?;

        for (name, entry) in tree.into_entries() {
            let path = prefix.join(&name);

            if entry.is_tree() {
                self.load_tree(database, &entry.oid, &path)?;
                self.mkdirs.insert(path);
            } else {
                let blob = database
                    .parse_object_as_blob(&entry.oid)
                    .with_context(|| format!("Failed to load blob for {}", path.display()))?;

                self.files.insert(path.clone(), blob.into_content());
                self.index_entries.insert(path, entry.oid);
            }
        }

        Ok(())
    }

    /// Directories to create, parents before children
    pub fn mkdirs(&self) -> &BTreeSet<PathBuf> {
        &self.mkdirs
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.files
    }

    /// Path -> blob id for every file, the index content after checkout
    pub fn index_entries(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.index_entries
    }
}

fn display_dir(prefix: &Path) -> String {
    if prefix.as_os_str().is_empty() {
        String::from("the root directory")
    } else {
        prefix.display().to_string()
    }
}
