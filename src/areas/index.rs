//! Staging index
//!
//! Tracks which content each path will have in the snapshot the user is preparing. The
//! index is loaded whole, mutated in memory and written back whole through a temporary
//! file plus rename, so a crash mid-save leaves the previous index intact.
//!
//! Callers that mutate the index hold the repository lock (see [`crate::areas::lockfile`]).

use crate::artifacts::core::error::KitError;
use crate::artifacts::index::index_entry::{IndexEntry, normalize_path};
use crate::artifacts::objects::object_id::ObjectId;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Directory -> tracked paths below it, for file/directory replacement
    children: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.changed = false;
    }

    /// Load the index from disk; a missing file is an empty index
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(KitError::io(self.path.to_path_buf(), e).into()),
        };
        let content = String::from_utf8(content)
            .map_err(|_| KitError::corrupt_file(&self.path, "index is not valid UTF-8"))?;

        for (number, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let entry = IndexEntry::parse(line).map_err(|e| {
                KitError::corrupt_file(&self.path, format!("line {}: {:#}", number + 1, e))
            })?;
            self.store_entry(entry);
        }
        tracing::debug!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    /// Rewrite the index file if anything changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut content = String::new();
        for entry in self.entries.values() {
            content.push_str(&entry.to_line());
            content.push('\n');
        }

        let index_dir = self
            .path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid index path {}", self.path.display()))?;
        let temp_path = index_dir.join(format!("index-{}.tmp", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| KitError::io(&temp_path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| KitError::io(&temp_path, e))?;
        drop(file);

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            KitError::io(self.path.to_path_buf(), e)
        })?;

        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "saved index");

        Ok(())
    }

    /// Stage `path` with content `oid`, replacing any file/directory conflict
    pub fn add(&mut self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        let entry = IndexEntry::new(normalize_path(path)?, oid);

        self.discard_conflicts(&entry);
        self.store_entry(entry);
        self.changed = true;

        Ok(())
    }

    pub fn remove(&mut self, path: &Path) {
        self.remove_entry(path);
        self.remove_children(path);
        self.changed = true;
    }

    /// Replace every entry with the given path -> blob mapping
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (PathBuf, ObjectId)>) {
        self.clear();

        for (name, oid) in entries {
            self.store_entry(IndexEntry::new(name, oid));
        }
        self.changed = true;
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// A path is tracked directly or is a directory containing tracked files
    pub fn is_directly_tracked(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        let parents = entry
            .parent_dirs()
            .into_iter()
            .map(Path::to_path_buf)
            .collect::<Vec<_>>();

        for parent in parents {
            self.remove_entry(&parent);
        }
        self.remove_children(&entry.name);
    }

    fn store_entry(&mut self, entry: IndexEntry) {
        for parent in entry.parent_dirs() {
            self.children
                .entry(parent.to_path_buf())
                .or_default()
                .insert(entry.name.clone());
        }

        self.entries.insert(entry.name.clone(), entry);
    }

    fn remove_children(&mut self, path: &Path) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &Path) {
        if let Some(entry) = self.entries.remove(path) {
            for parent in entry.parent_dirs() {
                if let Some(children) = self.children.get_mut(parent) {
                    children.remove(path);
                    if children.is_empty() {
                        self.children.remove(parent);
                    }
                }
            }
        }
    }
}
