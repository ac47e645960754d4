use crate::areas::repository::{Repository, RepositoryState};
use crate::areas::workspace::REPOSITORY_DIR;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, FileSet, NewCommit};
use crate::config::Config;
use crate::errors::{IoContext, VcError, VcResult};
use std::path::Path;

/// Message of the root commit every repository starts with
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

impl Repository {
    /// Create a repository in `path` with an empty root commit
    pub fn init(path: &Path) -> VcResult<Self> {
        std::fs::create_dir_all(path)
            .io_context(|| format!("unable to create directory {}", path.display()))?;
        let root = Self::canonical_root(path)?;
        let repo_dir = root.join(REPOSITORY_DIR);

        if repo_dir.exists() {
            return Err(VcError::AlreadyInitialized(root));
        }

        let config = Config::default().with_env_overrides();
        let branch = BranchName::try_parse(config.core.default_branch.as_str())?;

        // the root commit is the one commit allowed to record nothing
        let root_commit = Commit::build(NewCommit::new(
            None,
            None,
            None,
            branch,
            INITIAL_COMMIT_MESSAGE.to_string(),
            config.author(),
            FileSet::new(),
            Default::default(),
        ))?;

        std::fs::create_dir_all(&repo_dir)
            .io_context(|| format!("unable to create {}", repo_dir.display()))?;
        config.save(&Self::config_path(&root))?;

        let state = RepositoryState::initial(&root_commit);
        let repository = Self::assemble(root, config, state);
        repository.commits().persist(&root_commit)?;
        repository.save()?;

        tracing::info!(
            root = %repository.path().display(),
            hash = %root_commit.hash(),
            "initialized repository"
        );
        Ok(repository)
    }
}
