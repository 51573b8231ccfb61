use crate::areas::database::Database;
use crate::artifacts::core::error::KitError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Newest-first walk over a parent chain, restartable from `start`
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: Option<ObjectId>,
}

impl<'r> IntoIterator for &RevList<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: self.start.clone(),
            child_oid: None,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
    /// The commit that named `current_commit_oid` as its parent
    child_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                self.child_oid = Some(commit_oid.clone());

                Some(Ok((commit_oid, commit)))
            }
            Err(error) => match self.child_oid.take() {
                Some(child) => {
                    tracing::warn!(child = %child, missing = %commit_oid, "broken parent link: {:#}", error);

                    Some(Err(KitError::BrokenChain {
                        child: child.to_string(),
                        missing: commit_oid.to_string(),
                    }
                    .into()))
                }
                None => Some(Err(error)),
            },
        }
    }
}
