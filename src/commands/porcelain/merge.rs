use crate::areas::repository::{PendingMerge, Repository};
use crate::artifacts::merge::fork_walk::ForkWalk;
use crate::artifacts::merge::resolution::{Resolution, conflict_content};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub ancestor: ObjectId,
    /// Files whose merged content differs from ours, conflicts included
    pub staged: Vec<String>,
    pub conflicts: Vec<String>,
}

impl Repository {
    /// Merge another branch into the working directory and staging area
    ///
    /// The result is left staged; the next commit records it, with the
    /// merged branch head as its merge parent.
    pub fn merge(&mut self, other: &str) -> VcResult<MergeReport> {
        let (other_branch, their_head) = self.branches().try_head(other)?;
        let current_branch = self.current_branch().clone();

        if other_branch == current_branch {
            return Err(VcError::CannotMergeCurrent(other_branch));
        }
        if !self.staging().is_empty() {
            return Err(VcError::UncommittedChanges);
        }

        let ancestor = {
            let commits = self.commits();
            let walk = ForkWalk::new(self.branches(), |oid| {
                commits.load(oid).map(|commit| commit.branch().clone())
            });
            walk.common_ancestor(&current_branch, &other_branch)?
        };
        tracing::info!(%current_branch, %other_branch, %ancestor, "found merge base");

        let base = self.commits().load(&ancestor)?;
        let ours = self.head_commit()?;
        let theirs = self.commits().load(&their_head)?;

        let resolution = Resolution::resolve(
            base.staged_files(),
            ours.staged_files(),
            theirs.staged_files(),
        );

        let mut target = resolution.resolved;
        let mut conflicts = Vec::new();
        for conflict in resolution.conflicts {
            let ours = self.blobs().get(&conflict.ours, &conflict.file_name)?;
            let theirs = self.blobs().get(&conflict.theirs, &conflict.file_name)?;
            let content = conflict_content(&ours, &theirs, other_branch.as_ref());
            let oid = self.blobs().put(&conflict.file_name, &content)?;

            tracing::warn!(file_name = %conflict.file_name, "merge conflict");
            target.insert(conflict.file_name.clone(), oid);
            conflicts.push(conflict.file_name);
        }

        self.reconcile_workspace(&target)?;

        let mut staged = Vec::new();
        let state = self.state_mut();
        for (file_name, oid) in target {
            if ours.file(&file_name) != Some(&oid) {
                staged.push(file_name.clone());
                state.staging.stage(file_name, oid);
            }
        }
        if !staged.is_empty() {
            state.pending_merge = Some(PendingMerge {
                branch: other_branch,
                head: their_head,
            });
        }

        Ok(MergeReport {
            ancestor,
            staged,
            conflicts,
        })
    }
}
