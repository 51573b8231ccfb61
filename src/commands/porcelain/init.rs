use crate::areas::repository::{INDEX_FILE_NAME, REFS_DIR_NAME};
use crate::areas::repository::Repository;
use crate::areas::refs::HEAD_REF_NAME;
use crate::artifacts::core::error::KitError;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the storage directory; an existing repository is left as it is
    pub fn init(&self) -> anyhow::Result<()> {
        let kit_path = self.kit_path();
        let reinitialized = kit_path.is_dir();

        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).map_err(|e| KitError::io(objects_path, e))?;

        let refs_path = kit_path.join(REFS_DIR_NAME);
        fs::create_dir_all(&refs_path).map_err(|e| KitError::io(&refs_path, e))?;

        // HEAD and the index start out empty: no commits, nothing staged
        for file_name in [HEAD_REF_NAME, INDEX_FILE_NAME] {
            let file_path = kit_path.join(file_name);
            if !file_path.exists() {
                fs::write(&file_path, b"").map_err(|e| KitError::io(&file_path, e))?;
            }
        }
        tracing::debug!(path = %kit_path.display(), reinitialized, "initialised repository");

        writeln!(
            self.writer(),
            "{} kit repository in {}",
            if reinitialized {
                "Reinitialized existing"
            } else {
                "Initialized empty"
            },
            kit_path.display()
        )?;

        Ok(())
    }
}
