//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<40-char-hex-oid>`
//!
//! Entries are kept sorted by name (byte-wise), so a directory's tree id does not
//! depend on the order in which the filesystem listed its children. The object id
//! segment is fixed-width and not followed by a delimiter.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    /// Insert an entry, rejecting names that could escape the directory on restore
    pub fn add_entry(&mut self, name: String, entry: DatabaseEntry) -> anyhow::Result<()> {
        Self::validate_name(&name)?;
        self.entries.insert(name, entry);

        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate_name(name: &str) -> anyhow::Result<()> {
        if name.is_empty() || name == "." || name == ".." {
            anyhow::bail!("invalid tree entry name {:?}", name);
        }
        if name.contains(['/', '\\', '\0']) {
            anyhow::bail!("tree entry name {:?} contains a separator", name);
        }

        Ok(())
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::new();

        for (name, entry) in &self.entries {
            payload.extend_from_slice(entry.mode.as_str().as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(name.as_bytes());
            payload.push(b'\0');
            payload.extend_from_slice(entry.oid.as_ref().as_bytes());
        }

        Ok(frame(self.object_type(), &payload))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> anyhow::Result<Self> {
        let mut tree = Tree::default();
        let mut rest = payload.as_ref();

        while !rest.is_empty() {
            let space = rest
                .iter()
                .position(|&byte| byte == b' ')
                .context("unexpected end of tree entry mode")?;
            let mode = std::str::from_utf8(&rest[..space]).context("tree entry mode is not UTF-8")?;
            let mode = EntryMode::try_from(mode)?;
            rest = &rest[space + 1..];

            let nul = rest
                .iter()
                .position(|&byte| byte == b'\0')
                .context("unexpected end of tree entry name")?;
            let name = std::str::from_utf8(&rest[..nul])
                .context("tree entry name is not UTF-8")?
                .to_owned();
            rest = &rest[nul + 1..];

            if rest.len() < OBJECT_ID_LENGTH {
                anyhow::bail!("unexpected end of object id for tree entry {:?}", name);
            }
            let oid = std::str::from_utf8(&rest[..OBJECT_ID_LENGTH])
                .context("tree entry object id is not UTF-8")?;
            let oid = ObjectId::try_parse(oid.to_string())?;
            rest = &rest[OBJECT_ID_LENGTH..];

            if tree.entries.contains_key(&name) {
                anyhow::bail!("duplicate tree entry {:?}", name);
            }
            tree.add_entry(name, DatabaseEntry::new(oid, mode))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type().as_str(),
                    entry.oid.as_ref(),
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
