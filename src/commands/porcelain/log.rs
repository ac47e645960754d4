use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::{LogScope, RevList};
use crate::errors::{VcError, VcResult};

impl Repository {
    /// Walk history lazily, from HEAD along the current branch or from the
    /// newest commit along the global chain
    pub fn log(&self, scope: LogScope) -> VcResult<RevList<'_>> {
        let start = match scope {
            LogScope::Branch => self.head_oid().clone(),
            LogScope::Global => self.state().latest_commit.clone(),
        };

        if !self.commits().exists(&start) {
            return Err(VcError::CommitNotFound(start.to_string()));
        }

        Ok(RevList::new(self.commits(), start, scope))
    }
}
