use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use std::io::Write;

impl Repository {
    pub fn status(&self, porcelain: bool) -> anyhow::Result<StatusInfo> {
        let mut index = self.index();
        index.rehydrate()?;

        let status = self.inspector().classify(&index)?;

        if porcelain {
            for line in status.porcelain_lines() {
                writeln!(self.writer(), "{}", line)?;
            }
        } else {
            if self.refs().read_head()?.is_none() {
                writeln!(self.writer(), "No commits yet\n")?;
            }
            write!(self.writer(), "{}", status.long_format())?;
        }

        Ok(status)
    }
}
