//! Working directory access
//!
//! Every filesystem read or write the commands make against the user's files goes
//! through [`Workspace`]. Paths handed in and out are relative to the repository root.
//!
//! The exclusion predicate lives here too: the `.kit` storage directory and anything
//! matching a `.kitignore` pattern is invisible to add, status, write-tree and checkout.

use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::KitError;
use crate::artifacts::index::index_entry::normalize_path;
use crate::artifacts::objects::blob::Blob;
use bytes::Bytes;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const STORAGE_DIR_NAME: &str = ".kit";
pub const IGNORE_FILE_NAME: &str = ".kitignore";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    ignore: Gitignore,
}

impl Workspace {
    /// Open the working directory rooted at `path`, reading `.kitignore` if present
    pub fn new(path: Box<Path>) -> anyhow::Result<Self> {
        let ignore = load_ignore_file(&path)?;

        Ok(Workspace { path, ignore })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a repository-relative path is hidden from every command
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.is_excluded_as(path, self.is_dir(path))
    }

    /// `.kitignore` follows gitignore rules: a trailing `/` only matches directories,
    /// `!` re-includes and a pattern matching a parent directory hides everything below it
    fn is_excluded_as(&self, path: &Path, is_dir: bool) -> bool {
        let in_storage = path
            .components()
            .any(|c| c.as_os_str() == STORAGE_DIR_NAME);

        in_storage
            || self
                .ignore
                .matched_path_or_any_parents(path, is_dir)
                .is_ignore()
    }

    /// Turn a user-supplied path (relative to the root, or absolute) into a
    /// repository-relative one. `None` means the repository root itself.
    pub fn relativize(&self, path: &Path) -> anyhow::Result<Option<PathBuf>> {
        let relative = if path.is_absolute() {
            let absolute = path.canonicalize().map_err(|e| KitError::io(path, e))?;
            absolute
                .strip_prefix(&self.path)
                .map(Path::to_path_buf)
                .map_err(|_| {
                    KitError::invalid_argument(format!(
                        "{} is outside the repository",
                        path.display()
                    ))
                })?
        } else {
            path.to_path_buf()
        };

        if relative
            .components()
            .all(|c| matches!(c, std::path::Component::CurDir))
        {
            return Ok(None);
        }

        normalize_path(&relative)
            .map(Some)
            .map_err(|e| KitError::invalid_argument(format!("{:#}", e)).into())
    }

    /// Regular files under `root` (the whole tree when `None`), sorted, excluded paths
    /// skipped without descending into them. The first unreadable entry fails the listing.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        self.walk_files(root, |error| Err(walk_error(error).into()))
    }

    /// Same as [`Workspace::list_files`], except that entries which cannot be read are
    /// pushed to `failures` and the walk carries on with the rest of the tree
    pub fn list_files_collecting(
        &self,
        root: Option<&Path>,
        failures: &mut Vec<(PathBuf, String)>,
    ) -> anyhow::Result<Vec<PathBuf>> {
        self.walk_files(root, |error| {
            let path = error
                .path()
                .and_then(|path| self.relative_to_root(path))
                .unwrap_or_else(|| PathBuf::from("."));
            failures.push((path, format!("{:#}", anyhow::Error::from(walk_error(error)))));
            Ok(())
        })
    }

    fn walk_files(
        &self,
        root: Option<&Path>,
        mut on_error: impl FnMut(walkdir::Error) -> anyhow::Result<()>,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let absolute_root = match root {
            Some(root) => self.path.join(root),
            None => self.path.to_path_buf(),
        };

        let metadata =
            std::fs::symlink_metadata(&absolute_root).map_err(|e| KitError::io(&absolute_root, e))?;

        if metadata.is_file() {
            return Ok(root.map(Path::to_path_buf).into_iter().collect());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&absolute_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                self.relative_to_root(entry.path()).is_none_or(|relative| {
                    !self.is_excluded_as(&relative, entry.file_type().is_dir())
                })
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    on_error(error)?;
                    continue;
                }
            };

            if entry.file_type().is_file()
                && let Some(relative) = self.relative_to_root(entry.path())
            {
                files.push(relative);
            }
        }

        Ok(files)
    }

    /// Immediate non-excluded children of a directory, sorted by name
    pub fn list_dir(&self, dir: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let absolute_dir = match dir {
            Some(dir) => self.path.join(dir),
            None => self.path.to_path_buf(),
        };

        let mut children = std::fs::read_dir(&absolute_dir)
            .map_err(|e| KitError::io(&absolute_dir, e))?
            .map(|entry| {
                entry
                    .map(|entry| entry.path())
                    .map_err(|e| KitError::io(&absolute_dir, e))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|path| self.relative_to_root(&path))
            .filter(|relative| !self.is_excluded(relative))
            .collect::<Vec<_>>();
        children.sort();

        Ok(children)
    }

    /// Symbolic links are neither files nor directories here
    pub fn is_dir(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(self.path.join(path)).is_ok_and(|m| m.is_dir())
    }

    pub fn is_file(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(self.path.join(path)).is_ok_and(|m| m.is_file())
    }

    /// Nothing exists at `path`. A path that exists but cannot be inspected is not missing.
    pub fn is_missing(&self, path: &Path) -> bool {
        match std::fs::symlink_metadata(self.path.join(path)) {
            Ok(_) => false,
            Err(e) => matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
            ),
        }
    }

    pub fn read_file(&self, path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|e| KitError::io(path, e).into())
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(path)?))
    }

    pub fn write_file(&self, path: &Path, content: &[u8]) -> anyhow::Result<()> {
        std::fs::write(self.path.join(path), content).map_err(|e| KitError::io(path, e).into())
    }

    pub fn make_directory(&self, path: &Path) -> anyhow::Result<()> {
        let dir_path = self.path.join(path);

        if let Ok(metadata) = std::fs::symlink_metadata(&dir_path)
            && !metadata.is_dir()
        {
            std::fs::remove_file(&dir_path).map_err(|e| KitError::io(path, e))?;
        }

        std::fs::create_dir_all(&dir_path).map_err(|e| KitError::io(path, e).into())
    }

    /// Remove every non-excluded entry under the root.
    ///
    /// Failures do not stop the sweep; each one is returned with the path it hit.
    /// Directories that still hold excluded entries are left in place.
    pub fn clear(&self) -> Vec<(PathBuf, String)> {
        let mut failures = Vec::new();
        self.clear_dir(None, &mut failures);

        for (path, reason) in &failures {
            tracing::warn!(path = %path.display(), reason = %reason, "could not remove entry");
        }

        failures
    }

    fn clear_dir(&self, dir: Option<&Path>, failures: &mut Vec<(PathBuf, String)>) {
        let children = match self.list_dir(dir) {
            Ok(children) => children,
            Err(e) => {
                failures.push((dir.map(Path::to_path_buf).unwrap_or_default(), format!("{:#}", e)));
                return;
            }
        };

        for child in children {
            let absolute = self.path.join(&child);
            let is_dir = std::fs::symlink_metadata(&absolute)
                .map(|metadata| metadata.is_dir())
                .unwrap_or(false);

            if is_dir {
                self.clear_dir(Some(&child), failures);

                let still_holds_entries = std::fs::read_dir(&absolute)
                    .map(|mut entries| entries.next().is_some())
                    .unwrap_or(false);
                if !still_holds_entries && let Err(e) = std::fs::remove_dir(&absolute) {
                    failures.push((child, e.to_string()));
                }
            } else if let Err(e) = std::fs::remove_file(&absolute) {
                failures.push((child, e.to_string()));
            }
        }
    }

    /// Recreate the directories and files a prepared checkout describes
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        // parents sort before their children, so plain order creates them top-down
        for dir in migration.mkdirs() {
            self.make_directory(dir)?;
        }

        for (path, content) in migration.files() {
            self.write_file(path, content)?;
        }
        tracing::debug!(
            dirs = migration.mkdirs().len(),
            files = migration.files().len(),
            "restored working tree"
        );

        Ok(())
    }

    fn relative_to_root(&self, path: &Path) -> Option<PathBuf> {
        let relative = path.strip_prefix(&self.path).ok()?;

        if relative.as_os_str().is_empty() {
            None
        } else {
            Some(relative.to_path_buf())
        }
    }
}

fn load_ignore_file(root: &Path) -> anyhow::Result<Gitignore> {
    let ignore_path = root.join(IGNORE_FILE_NAME);

    let content = match std::fs::read_to_string(&ignore_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Gitignore::empty()),
        Err(e) => return Err(KitError::io(ignore_path, e).into()),
    };

    let invalid =
        |e: ignore::Error| KitError::invalid_argument(format!("{}: {}", ignore_path.display(), e));

    let mut builder = GitignoreBuilder::new(root);
    for line in content.lines() {
        builder
            .add_line(Some(ignore_path.clone()), line)
            .map_err(invalid)?;
    }

    Ok(builder.build().map_err(invalid)?)
}

fn walk_error(error: walkdir::Error) -> KitError {
    let path = error.path().map(Path::to_path_buf).unwrap_or_default();

    match error.into_io_error() {
        Some(io) => KitError::io(path, io),
        None => KitError::invalid_argument("filesystem loop detected"),
    }
}
