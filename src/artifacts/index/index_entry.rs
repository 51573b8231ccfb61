//! A single staged record: repository-relative path plus the blob id of its content

use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Parse one `"<oid> <path>"` record
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let (oid, name) = line
            .split_once(' ')
            .ok_or_else(|| anyhow::anyhow!("missing separator in record {:?}", line))?;

        let oid = ObjectId::try_parse(oid.to_string())?;
        let name = normalize_path(Path::new(name))?;

        Ok(IndexEntry { name, oid })
    }

    /// Render the record without its trailing newline
    pub fn to_line(&self) -> String {
        format!("{} {}", self.oid, to_slash_string(&self.name))
    }

    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut parents = self
            .name
            .ancestors()
            .skip(1)
            .filter(|parent| !parent.as_os_str().is_empty())
            .collect::<Vec<_>>();
        parents.reverse();

        parents
    }
}

/// Reduce a repository-relative path to its canonical index form.
///
/// Drops `.` components and rejects absolute paths, `..` and empty paths.
pub fn normalize_path(path: &Path) -> anyhow::Result<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                anyhow::bail!("path {:?} escapes the repository", path)
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        anyhow::bail!("empty path");
    }

    Ok(normalized)
}

pub fn to_slash_string(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
