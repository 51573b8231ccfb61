use crate::areas::repository::Repository;
use crate::artifacts::core::error::KitError;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot the working directory and print the root tree id
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let _lock = self.lock()?;
        let tree_id = self.build_tree(None)?;

        writeln!(self.writer(), "{}", tree_id)?;

        Ok(tree_id)
    }

    /// Store `dir` (the root when `None`) as a tree, children first.
    ///
    /// Empty directories become empty trees. Anything that is neither a regular file
    /// nor a directory is left out.
    pub(crate) fn build_tree(&self, dir: Option<&Path>) -> anyhow::Result<ObjectId> {
        let workspace = self.workspace();
        let mut tree = Tree::default();

        for child in workspace.list_dir(dir)? {
            let name = child
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    KitError::invalid_argument(format!(
                        "file name of {} is not valid UTF-8",
                        child.display()
                    ))
                })?
                .to_string();

            let entry = if workspace.is_dir(&child) {
                DatabaseEntry::new(self.build_tree(Some(&child))?, EntryMode::Directory)
            } else if workspace.is_file(&child) {
                let blob = workspace.parse_blob(&child)?;
                DatabaseEntry::new(self.database().store(&blob)?, EntryMode::File)
            } else {
                tracing::debug!(path = %child.display(), "skipping special file");
                continue;
            };

            tree.add_entry(name, entry)?;
        }

        self.database().store(&tree)
    }
}
