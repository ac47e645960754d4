use crate::areas::commit_store::CommitStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcResult;
use derive_new::new;

/// Which parent chain a history walk follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogScope {
    /// Commits of one branch, through `prev_commit`
    #[default]
    Branch,
    /// Every commit in the repository, through `global_prev_commit`
    Global,
}

#[derive(Clone, new)]
pub struct RevList<'s> {
    commits: &'s CommitStore,
    start: ObjectId,
    scope: LogScope,
}

impl<'s> IntoIterator for RevList<'s> {
    type Item = VcResult<Commit>;
    type IntoIter = RevListIntoIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            commits: self.commits,
            current_commit_oid: Some(self.start),
            scope: self.scope,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'s> {
    commits: &'s CommitStore,
    current_commit_oid: Option<ObjectId>,
    scope: LogScope,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = VcResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.commits.load(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = match self.scope {
                    LogScope::Branch => commit.prev_commit().cloned(),
                    LogScope::Global => commit.global_prev_commit().cloned(),
                };
                Some(Ok(commit))
            }
            // A broken link ends the walk after reporting it once
            Err(e) => Some(Err(e)),
        }
    }
}
