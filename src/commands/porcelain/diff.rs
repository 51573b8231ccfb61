use crate::areas::repository::Repository;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Name every staged file whose working copy changed or vanished.
    ///
    /// Only a header per file is printed; line-level hunks are not computed.
    pub fn diff(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let status = self.inspector().classify(&index)?;
        let changed = status
            .modified
            .iter()
            .chain(status.deleted.iter())
            .collect::<BTreeSet<_>>();

        if changed.is_empty() {
            writeln!(self.writer(), "No changes detected")?;
            return Ok(());
        }

        for file in changed {
            let deleted = status.deleted.contains(file);
            let path = file.display();

            writeln!(self.writer(), "{}", format!("diff --kit a/{} b/{}", path, path).bold())?;
            writeln!(self.writer(), "{}", format!("--- a/{}", path).red())?;
            if deleted {
                writeln!(self.writer(), "{}", "+++ /dev/null".green())?;
                writeln!(self.writer(), "{}", "@@ file deleted @@".cyan())?;
            } else {
                writeln!(self.writer(), "{}", format!("+++ b/{}", path).green())?;
                writeln!(self.writer(), "{}", "@@ file modified @@".cyan())?;
            }
        }

        Ok(())
    }
}
