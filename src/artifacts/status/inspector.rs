use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::{FileSet, StatusInfo};
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flattened tree: every file path mapped to its blob id
pub type HeadTree = BTreeMap<PathBuf, ObjectId>;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Compare the working directory with the staging index
    pub fn classify(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let workspace = self.repository.workspace();
        let mut status = StatusInfo::default();

        for entry in index.entries() {
            status.staged.insert(entry.name.clone());

            if !workspace.is_file(&entry.name) {
                status.deleted.insert(entry.name.clone());
            } else if self.hash_workspace_file(&entry.name)? != entry.oid {
                status.modified.insert(entry.name.clone());
            }
        }

        status.untracked = workspace
            .list_files(None)?
            .into_iter()
            .filter(|path| !index.is_tracked(path))
            .collect();

        tracing::debug!(
            staged = status.staged.len(),
            modified = status.modified.len(),
            deleted = status.deleted.len(),
            untracked = status.untracked.len(),
            "classified working tree"
        );

        Ok(status)
    }

    /// Working files whose content is not recorded in the HEAD commit.
    ///
    /// These are exactly the files a checkout would destroy without a trace in history.
    pub fn uncommitted_changes(&self) -> anyhow::Result<FileSet> {
        let head_tree = self.load_head_tree()?;
        let mut changes = FileSet::new();

        for path in self.repository.workspace().list_files(None)? {
            match head_tree.get(&path) {
                Some(oid) if *oid == self.hash_workspace_file(&path)? => {}
                _ => {
                    changes.insert(path);
                }
            }
        }

        Ok(changes)
    }

    pub fn load_head_tree(&self) -> anyhow::Result<HeadTree> {
        let database = self.repository.database();

        match self.repository.refs().read_head()? {
            Some(head_oid) => {
                let commit = database.parse_object_as_commit(&head_oid)?;
                flatten_tree(database, commit.tree_oid())
            }
            None => Ok(HeadTree::new()),
        }
    }

    fn hash_workspace_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        self.repository.workspace().parse_blob(path)?.object_id()
    }
}

/// Walk a stored tree and collect every file below it
pub fn flatten_tree(database: &Database, tree_oid: &ObjectId) -> anyhow::Result<HeadTree> {
    let mut files = HeadTree::new();
    collect_tree(database, tree_oid, Path::new(""), &mut files)?;

    Ok(files)
}

fn collect_tree(
    database: &Database,
    tree_oid: &ObjectId,
    prefix: &Path,
    files: &mut HeadTree,
) -> anyhow::Result<()> {
    for (name, entry) in database.parse_object_as_tree(tree_oid)?.into_entries() {
        let path = prefix.join(name);

        if entry.is_tree() {
            collect_tree(database, &entry.oid, &path, files)?;
        } else {
            files.insert(path, entry.oid);
        }
    }

    Ok(())
}
