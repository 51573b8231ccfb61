use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print the history from HEAD back to the root commit.
    ///
    /// A broken parent link fails the command after the reachable commits are printed.
    pub fn log(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        if head.is_none() {
            writeln!(self.writer(), "No commits yet")?;
            return Ok(());
        }

        let rev_list = RevList::new(self.database(), head);
        for (position, item) in rev_list.into_iter().enumerate() {
            let (oid, commit) = item?;

            if position > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(&oid, &commit)?;
        }

        Ok(())
    }

    /// Print one commit followed by the entries of its root tree
    pub fn show(&self, reference: &str) -> anyhow::Result<()> {
        let oid = self.database().resolve(reference)?;
        let commit = self.database().load_commit(&oid)?;

        self.show_commit_medium(&oid, &commit)?;
        writeln!(self.writer())?;
        self.print_tree(commit.tree_oid(), false)
    }

    fn show_commit_medium(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", oid).yellow()
        )?;
        if let Some(parent) = commit.parent() {
            writeln!(self.writer(), "Parent: {}", parent.to_short_oid())?;
        }
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}
