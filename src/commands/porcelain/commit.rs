use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, NewCommit};
use crate::errors::{VcError, VcResult};

impl Repository {
    /// Record the staging area on top of HEAD
    ///
    /// Nothing is mutated when the message is blank or there is nothing to
    /// commit.
    pub fn commit(&mut self, message: &str) -> VcResult<Commit> {
        if message.trim().is_empty() {
            return Err(VcError::EmptyMessage);
        }
        if self.staging().is_empty() {
            return Err(VcError::NoChanges);
        }

        let head = self.head_commit()?;
        let state = self.state();
        let draft = NewCommit::new(
            Some(head.hash().clone()),
            Some(state.latest_commit.clone()),
            state.pending_merge.as_ref().map(|merge| merge.head.clone()),
            state.current_branch.clone(),
            message.to_string(),
            self.config().author(),
            state.staging.snapshot(head.staged_files()),
            state.staging.removed().clone(),
        );

        let commit = self.commits().create(draft)?;
        self.commits().persist(&commit)?;

        let state = self.state_mut();
        state.head = commit.hash().clone();
        state.latest_commit = commit.hash().clone();
        state
            .branches
            .set_head(commit.branch().clone(), commit.hash().clone());
        state.staging.clear();
        state.pending_merge = None;

        tracing::info!(
            hash = %commit.hash(),
            branch = %commit.branch(),
            files = commit.staged_files().len(),
            "created commit"
        );
        Ok(commit)
    }
}
