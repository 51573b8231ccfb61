use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use std::io::Write;

impl Repository {
    /// Snapshot the working directory as a new commit on top of HEAD
    pub fn commit(&self, message: Option<&str>) -> anyhow::Result<Commit> {
        let _lock = self.lock()?;

        let tree_id = self.build_tree(None)?;
        let parent = self.refs().read_head()?;
        let is_root = if parent.is_some() { "" } else { "(root-commit) " };

        let author = Author::load_from_env()?;
        let commit = Commit::new(
            parent,
            tree_id,
            author,
            message.unwrap_or_default().to_string(),
        );

        // HEAD only moves once the commit object is safely stored
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit)
    }
}
