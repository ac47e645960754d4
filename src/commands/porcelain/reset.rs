use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::rev_list::{LogScope, RevList};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    pub landed: ObjectId,
    pub branch: BranchName,
    /// Branches that only existed after the landed commit
    pub removed_branches: Vec<BranchName>,
}

impl Repository {
    /// Rewind the repository to a commit on the global chain
    ///
    /// Every commit made after the target is stepped over: branches are
    /// rolled back past it, or dropped when it was their first commit. The
    /// new branch table is worked out before anything is touched.
    pub fn reset(&mut self, revision: &str) -> VcResult<ResetReport> {
        let landed = self.resolve_commit(revision)?;
        let stepped = self.commits_after(&landed, revision)?;

        let mut branches = self.branches().clone();
        let mut removed_branches = Vec::new();

        for commit in &stepped {
            let prev = commit.prev_commit().cloned();
            let continues_branch = match &prev {
                Some(prev) => self.commits().load(prev)?.branch() == commit.branch(),
                None => false,
            };

            match prev {
                Some(prev) if continues_branch => {
                    if branches.contains(commit.branch()) {
                        tracing::debug!(branch = %commit.branch(), head = %prev, "rolling branch back");
                        branches.set_head(commit.branch().clone(), prev);
                    }
                }
                _ => {
                    if branches.remove_branch(commit.branch()).is_some() {
                        removed_branches.push(commit.branch().clone());
                    }
                }
            }
        }

        // branches created on top of a stepped-over commit did not exist yet
        let stepped_oids = stepped.iter().map(Commit::hash).collect::<HashSet<_>>();
        let created_later = branches
            .names()
            .filter(|name| {
                branches.head(name).is_some_and(|oid| stepped_oids.contains(oid))
                    || branches
                        .fork_point(name)
                        .is_some_and(|oid| stepped_oids.contains(oid))
            })
            .cloned()
            .collect::<Vec<_>>();
        for name in created_later {
            branches.remove_branch(&name);
            removed_branches.push(name);
        }

        branches.set_head(landed.branch().clone(), landed.hash().clone());

        self.reconcile_workspace(landed.staged_files())?;

        let state = self.state_mut();
        state.branches = branches;
        state.head = landed.hash().clone();
        state.latest_commit = landed.hash().clone();
        state.current_branch = landed.branch().clone();
        state.staging.clear();
        state.pending_merge = None;

        tracing::info!(
            hash = %landed.hash(),
            stepped_over = stepped.len(),
            "reset repository"
        );
        Ok(ResetReport {
            landed: landed.hash().clone(),
            branch: landed.branch().clone(),
            removed_branches,
        })
    }

    /// Commits on the global chain newer than `target`, newest first
    fn commits_after(&self, target: &Commit, revision: &str) -> VcResult<Vec<Commit>> {
        let mut stepped = Vec::new();
        let latest = self.state().latest_commit.clone();

        for commit in RevList::new(self.commits(), latest, LogScope::Global) {
            let commit = commit?;
            if commit.hash() == target.hash() {
                return Ok(stepped);
            }
            stepped.push(commit);
        }

        Err(VcError::CommitNotFound(revision.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::checkout::target::CheckoutTarget;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::path::Path;

    struct Fixture {
        dir: TempDir,
        repository: Repository,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repository = Repository::init(dir.path()).unwrap();
        Fixture { dir, repository }
    }

    fn commit_file(repository: &mut Repository, name: &str, content: &str, message: &str) -> Commit {
        repository
            .workspace()
            .write_file(name, content.as_bytes())
            .unwrap();
        repository.add(Path::new(name)).unwrap();
        repository.commit(message).unwrap()
    }

    #[rstest]
    fn rewinds_a_linear_history(fixture: Fixture) {
        let Fixture {
            dir,
            mut repository,
        } = fixture;
        let c1 = commit_file(&mut repository, "a.txt", "one", "C1");
        commit_file(&mut repository, "a.txt", "two", "C2");
        commit_file(&mut repository, "b.txt", "three", "C3");

        let report = repository.reset(c1.hash().as_ref()).unwrap();

        assert_eq!(&report.landed, c1.hash());
        assert_eq!(repository.head_oid(), c1.hash());
        assert_eq!(
            repository.branches().head(repository.current_branch()),
            Some(c1.hash())
        );
        assert_eq!(std::fs::read_to_string(dir.path().join("a.txt")).unwrap(), "one");
        assert!(!dir.path().join("b.txt").exists());
    }

    #[rstest]
    fn drops_branches_created_after_the_target(fixture: Fixture) {
        let mut repository = fixture.repository;
        let c1 = commit_file(&mut repository, "a.txt", "one", "C1");
        repository
            .checkout(CheckoutTarget::NewBranch("early".to_string()))
            .unwrap();
        repository
            .checkout(CheckoutTarget::Branch("master".to_string()))
            .unwrap();
        commit_file(&mut repository, "a.txt", "two", "C2");
        repository
            .checkout(CheckoutTarget::NewBranch("feature".to_string()))
            .unwrap();
        commit_file(&mut repository, "f.txt", "feature", "F1");
        repository
            .checkout(CheckoutTarget::NewBranch("empty".to_string()))
            .unwrap();

        let report = repository.reset(c1.hash().as_ref()).unwrap();

        let names = repository
            .branches()
            .names()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["early", "master"]);
        assert_eq!(repository.current_branch().as_ref(), "master");
        assert_eq!(report.removed_branches.len(), 2);
    }

    #[rstest]
    fn unknown_or_foreign_commits_are_refused(fixture: Fixture) {
        let mut repository = fixture.repository;
        let head = repository.head_oid().clone();

        assert!(matches!(
            repository.reset("0123456789abcdef0123456789abcdef01234567"),
            Err(VcError::CommitNotFound(_))
        ));
        assert_eq!(repository.head_oid(), &head);
    }
}
