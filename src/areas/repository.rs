//! Repository context
//!
//! A [`Repository`] bundles the object database, staging index, HEAD pointer and working
//! directory for one root, plus the writer command output goes to. Commands are
//! implemented as `impl Repository` blocks under [`crate::commands`].

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::lockfile::{LOCK_FILE_NAME, RepositoryLock};
use crate::areas::refs::Refs;
use crate::areas::workspace::{STORAGE_DIR_NAME, Workspace};
use crate::artifacts::core::error::KitError;
use crate::artifacts::status::inspector::Inspector;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub const OBJECTS_DIR_NAME: &str = "objects";
pub const REFS_DIR_NAME: &str = "refs";
pub const INDEX_FILE_NAME: &str = "index";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Build a context for `path` without requiring the storage directory to exist
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| KitError::io(path, e))?;
        }
        let path = path.canonicalize().map_err(|e| KitError::io(path, e))?;
        let kit_path = path.join(STORAGE_DIR_NAME);

        let index = Index::new(kit_path.join(INDEX_FILE_NAME).into_boxed_path());
        let database = Database::new(kit_path.join(OBJECTS_DIR_NAME).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path())?;
        let refs = Refs::new(kit_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an initialised repository rooted at `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.join(STORAGE_DIR_NAME).is_dir() {
            return Err(KitError::NotARepository {
                path: path.to_path_buf(),
            }
            .into());
        }

        Self::new(path, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_path(&self) -> PathBuf {
        self.path.join(STORAGE_DIR_NAME)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn inspector(&'_ self) -> Inspector<'_> {
        Inspector::new(self)
    }

    /// Take the exclusive repository lock for a mutating command
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        RepositoryLock::acquire(&self.kit_path().join(LOCK_FILE_NAME))
    }
}
