use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;

/// Classification of working files against the staging index.
///
/// `staged` holds every indexed path; the other sets are disjoint from each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub staged: FileSet,
    pub modified: FileSet,
    pub deleted: FileSet,
    pub untracked: FileSet,
}

impl StatusInfo {
    /// Nothing differs between the index and the working directory
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.deleted.is_empty() && self.untracked.is_empty()
    }

    /// Two-column machine-readable lines
    pub fn porcelain_lines(&self) -> Vec<String> {
        let sections: [(&str, &FileSet); 4] = [
            ("A ", &self.staged),
            (" M", &self.modified),
            (" D", &self.deleted),
            ("??", &self.untracked),
        ];

        sections
            .iter()
            .flat_map(|(code, files)| {
                files
                    .iter()
                    .map(move |file| format!("{} {}", code, file.display()))
            })
            .collect()
    }

    /// Sectioned human-readable report
    pub fn long_format(&self) -> String {
        let mut output = String::new();

        Self::push_section(&mut output, "Staged files:", &self.staged, |s| s.green().to_string());
        Self::push_section(&mut output, "Modified files:", &self.modified, |s| {
            s.red().to_string()
        });
        Self::push_section(&mut output, "Deleted files:", &self.deleted, |s| {
            s.red().to_string()
        });
        Self::push_section(&mut output, "Untracked files:", &self.untracked, |s| {
            s.red().to_string()
        });

        if self.staged.is_empty() && self.is_clean() {
            output.push_str("nothing to commit, working tree clean\n");
        }

        output
    }

    fn push_section(
        output: &mut String,
        header: &str,
        files: &FileSet,
        paint: impl Fn(&str) -> String,
    ) {
        if files.is_empty() {
            return;
        }

        output.push_str(header);
        output.push('\n');
        for file in files {
            output.push('\t');
            output.push_str(&paint(&file.display().to_string()));
            output.push('\n');
        }
        output.push('\n');
    }
}
