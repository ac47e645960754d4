use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::target::CheckoutTarget;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    BranchCreated(BranchName),
    FileRestored { file: String, commit: ObjectId },
    Switched(BranchName),
}

impl Repository {
    pub fn checkout(&mut self, target: CheckoutTarget) -> VcResult<CheckoutOutcome> {
        match target {
            CheckoutTarget::NewBranch(name) => self.checkout_new_branch(&name),
            CheckoutTarget::FileFromHead(file) => {
                let head = self.head_commit()?;
                self.restore_file(&head, &file)
            }
            CheckoutTarget::FileFromCommit { commit, file } => {
                let commit = self.resolve_commit(&commit)?;
                self.restore_file(&commit, &file)
            }
            CheckoutTarget::Branch(name) => self.switch_branch(&name),
        }
    }

    fn checkout_new_branch(&mut self, name: &str) -> VcResult<CheckoutOutcome> {
        let branch = BranchName::try_parse(name)?;
        let head = self.head_oid().clone();

        let state = self.state_mut();
        state.branches.create_branch(branch.clone(), head)?;
        state.current_branch = branch.clone();
        state.staging.clear();
        state.pending_merge = None;

        Ok(CheckoutOutcome::BranchCreated(branch))
    }

    fn restore_file(&self, commit: &Commit, file: &str) -> VcResult<CheckoutOutcome> {
        let file_name = self.workspace().normalize(Path::new(file))?;
        let oid = commit
            .file(&file_name)
            .ok_or_else(|| VcError::FileNotInCommit {
                file: file_name.clone(),
                commit: commit.hash().to_short_oid(),
            })?;

        let content = self.blobs().get(oid, &file_name)?;
        self.workspace().write_file(&file_name, &content)?;

        tracing::info!(%file_name, commit = %commit.hash(), "restored file");
        Ok(CheckoutOutcome::FileRestored {
            file: file_name,
            commit: commit.hash().clone(),
        })
    }

    fn switch_branch(&mut self, name: &str) -> VcResult<CheckoutOutcome> {
        let (branch, head) = self.branches().try_head(name)?;
        let target = self.commits().load(&head)?;

        self.reconcile_workspace(target.staged_files())?;

        let state = self.state_mut();
        state.current_branch = branch.clone();
        state.head = head;
        state.staging.clear();
        state.pending_merge = None;

        tracing::info!(%branch, "switched branch");
        Ok(CheckoutOutcome::Switched(branch))
    }
}
