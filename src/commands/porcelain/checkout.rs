use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Replace the working directory with the tree of a commit and move HEAD to it.
    ///
    /// This is destructive: every non-excluded file is deleted before the target tree is
    /// written. Unless `force` is set, the checkout is refused while any working file is
    /// missing from, or differs from, the HEAD commit.
    pub fn checkout(&self, reference: &str, force: bool) -> anyhow::Result<ObjectId> {
        let _lock = self.lock()?;

        let target_oid = self.database().resolve(reference)?;
        let commit = self.database().load_commit(&target_oid)?;

        if !force {
            let changes = self.inspector().uncommitted_changes()?;
            if !changes.is_empty() {
                return Err(KitError::DirtyWorkingTree {
                    paths: changes.into_iter().collect(),
                }
                .into());
            }
        }

        // every object is loaded before the first file is removed
        let migration = Migration::prepare(self.database(), commit.tree_oid())?;

        let failures = self.workspace().clear();
        self.workspace().apply_migration(&migration)?;

        let mut index = self.index();
        index.replace_all(migration.index_entries().clone());
        index.write_updates()?;

        self.refs().update_head(&target_oid)?;

        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_oid.to_short_oid(),
            commit.short_message()
        )?;

        if !failures.is_empty() {
            return Err(KitError::PartialFailure {
                operation: "checkout",
                failures,
            }
            .into());
        }

        Ok(target_oid)
    }
}
