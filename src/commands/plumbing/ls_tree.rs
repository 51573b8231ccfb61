use crate::areas::repository::Repository;
use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// List the entries of a tree, or of a commit's root tree
    pub fn ls_tree(&self, reference: &str, name_only: bool) -> anyhow::Result<()> {
        let object_id = self.database().resolve(reference)?;
        let tree_oid = self.peel_to_tree(&object_id)?;

        self.print_tree(&tree_oid, name_only)
    }

    pub(crate) fn print_tree(&self, tree_oid: &ObjectId, name_only: bool) -> anyhow::Result<()> {
        let tree = self.database().parse_object_as_tree(tree_oid)?;

        for (name, entry) in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", name)?;
            } else {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    name
                )?;
            }
        }

        Ok(())
    }

    fn peel_to_tree(&self, object_id: &ObjectId) -> anyhow::Result<ObjectId> {
        match self.database().parse_object(object_id)? {
            ObjectBox::Tree(_) => Ok(object_id.clone()),
            ObjectBox::Commit(commit) => Ok(commit.tree_oid().clone()),
            ObjectBox::Blob(_) => Err(KitError::invalid_argument(format!(
                "object {} is a blob, not a tree",
                object_id
            ))
            .into()),
        }
    }
}
