use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage files and directories (`.` stages everything).
    ///
    /// Every path that can be staged is staged and saved even when others fail; the
    /// failures are then reported together.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        let mut index = self.index();
        index.rehydrate()?;

        let mut failures = Vec::new();

        for path in paths {
            if let Err(e) = self.add_path(&mut index, path, &mut failures) {
                failures.push((path.clone(), format!("{:#}", e)));
            }
        }

        index.write_updates()?;

        if failures.is_empty() {
            return Ok(());
        }

        for (path, reason) in &failures {
            tracing::warn!(path = %path.display(), reason = %reason, "could not stage path");
        }

        Err(KitError::PartialFailure {
            operation: "add",
            failures,
        }
        .into())
    }

    fn add_path(
        &self,
        index: &mut Index,
        path: &Path,
        failures: &mut Vec<(PathBuf, String)>,
    ) -> anyhow::Result<()> {
        let workspace = self.workspace();
        let relative = workspace.relativize(path)?;

        if let Some(relative) = &relative {
            if workspace.is_excluded(relative) {
                return Err(KitError::invalid_argument("path is excluded from tracking").into());
            }

            if workspace.is_missing(relative) {
                // a tracked file that disappeared is staged as removed
                if index.is_directly_tracked(relative) {
                    index.remove(relative);
                    return Ok(());
                }
                return Err(KitError::not_found("no such file or directory").into());
            }
        }

        self.drop_deleted_entries(index, relative.as_deref());

        // unreadable entries are reported, the readable rest is still staged
        for file in workspace.list_files_collecting(relative.as_deref(), failures)? {
            if let Err(e) = self.stage_file(index, &file) {
                failures.push((file, format!("{:#}", e)));
            }
        }

        Ok(())
    }

    /// Hash and store one file, then point its index entry at the new blob
    pub fn stage_file(&self, index: &mut Index, path: &Path) -> anyhow::Result<ObjectId> {
        let blob = self.workspace().parse_blob(path)?;
        let oid = self.database().store(&blob)?;

        index.add(path, oid.clone())?;
        tracing::debug!(path = %path.display(), oid = %oid, "staged file");

        Ok(oid)
    }

    fn drop_deleted_entries(&self, index: &mut Index, root: Option<&Path>) {
        let deleted = index
            .entries()
            .map(|entry| entry.name.clone())
            .filter(|name| root.is_none_or(|root| name.starts_with(root)))
            .filter(|name| self.workspace().is_missing(name) || self.workspace().is_dir(name))
            .collect::<Vec<_>>();

        for name in deleted {
            tracing::debug!(path = %name.display(), "unstaged deleted file");
            index.remove(&name);
        }
    }
}
