use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Pretty-print the payload
    Print,
    Size,
    Type,
}

impl Repository {
    pub fn cat_file(&self, reference: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = self.database().resolve(reference)?;

        match mode {
            CatFileMode::Type => {
                let object_type = self.database().object_type(&object_id)?;
                writeln!(self.writer(), "{}", object_type)?;
            }
            CatFileMode::Size => {
                let size = self.database().object_size(&object_id)?;
                writeln!(self.writer(), "{}", size)?;
            }
            CatFileMode::Print => match self.database().parse_object(&object_id)? {
                // blob bytes go out untouched, binary content included
                ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
                ObjectBox::Tree(tree) => {
                    if !tree.is_empty() {
                        writeln!(self.writer(), "{}", tree.display())?;
                    }
                }
                ObjectBox::Commit(commit) => writeln!(self.writer(), "{}", commit.display())?,
            },
        }

        Ok(())
    }
}
