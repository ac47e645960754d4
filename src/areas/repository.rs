use crate::areas::blob_store::BlobStore;
use crate::areas::commit_store::CommitStore;
use crate::areas::index::StagingArea;
use crate::areas::refs::BranchTable;
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::{Commit, FileSet};
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::Config;
use crate::errors::{IoContext, VcError, VcResult};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "STATE";
const CONFIG_FILE: &str = "config.toml";
const BLOBS_DIR: &str = "blobs";
const COMMITS_DIR: &str = "commits";
const SCRATCH_DIR: &str = "tmp";

/// A merge staged by `merge` and waiting for the commit that records it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMerge {
    pub branch: BranchName,
    pub head: ObjectId,
}

/// Everything that survives between two invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub head: ObjectId,
    pub current_branch: BranchName,
    /// Tip of the global chain
    pub latest_commit: ObjectId,
    #[serde(default)]
    pub staging: StagingArea,
    #[serde(default)]
    pub branches: BranchTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_merge: Option<PendingMerge>,
}

impl RepositoryState {
    /// State right after the first commit of a repository
    pub fn initial(root_commit: &Commit) -> Self {
        let mut branches = BranchTable::default();
        branches.set_head(root_commit.branch().clone(), root_commit.hash().clone());

        RepositoryState {
            head: root_commit.hash().clone(),
            current_branch: root_commit.branch().clone(),
            latest_commit: root_commit.hash().clone(),
            staging: StagingArea::default(),
            branches,
            pending_merge: None,
        }
    }
}

pub struct Repository {
    path: Box<Path>,
    config: Config,
    blobs: BlobStore,
    commits: CommitStore,
    workspace: Workspace,
    state: RepositoryState,
}

impl Repository {
    /// Open the repository rooted at `path`
    pub fn open(path: &Path) -> VcResult<Self> {
        let root = Self::canonical_root(path)?;
        let repo_dir = root.join(REPOSITORY_DIR);
        let state_path = repo_dir.join(STATE_FILE);

        if !state_path.is_file() {
            return Err(VcError::NotInitialized(root));
        }

        let config = Config::load(&repo_dir.join(CONFIG_FILE))?.with_env_overrides();
        let content = std::fs::read(&state_path)
            .io_context(|| format!("unable to read state file {}", state_path.display()))?;
        let state = serde_json::from_slice(&content)?;

        tracing::debug!(root = %root.display(), "opened repository");
        Ok(Self::assemble(root, config, state))
    }

    pub(crate) fn assemble(root: PathBuf, config: Config, state: RepositoryState) -> Self {
        let repo_dir = root.join(REPOSITORY_DIR);

        Repository {
            blobs: BlobStore::new(repo_dir.join(BLOBS_DIR).into_boxed_path()),
            commits: CommitStore::new(repo_dir.join(COMMITS_DIR).into_boxed_path()),
            workspace: Workspace::new(
                root.clone().into_boxed_path(),
                repo_dir.join(SCRATCH_DIR).into_boxed_path(),
                config.workspace.clone(),
            ),
            path: root.into_boxed_path(),
            config,
            state,
        }
    }

    pub(crate) fn canonical_root(path: &Path) -> VcResult<PathBuf> {
        path.canonicalize()
            .io_context(|| format!("unable to resolve {}", path.display()))
    }

    /// Write the state snapshot, replacing the previous one atomically
    pub fn save(&self) -> VcResult<()> {
        let repo_dir = self.repository_dir();
        let content = serde_json::to_vec_pretty(&self.state)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&repo_dir)
            .io_context(|| format!("unable to create temp file in {}", repo_dir.display()))?;
        temp_file
            .write_all(&content)
            .io_context(|| "unable to write repository state")?;
        temp_file
            .persist(repo_dir.join(STATE_FILE))
            .map_err(|e| VcError::io("unable to persist repository state", e.error))?;

        tracing::debug!("saved repository state");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_dir(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub(crate) fn config_path(root: &Path) -> PathBuf {
        root.join(REPOSITORY_DIR).join(CONFIG_FILE)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn commits(&self) -> &CommitStore {
        &self.commits
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut RepositoryState {
        &mut self.state
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.state.current_branch
    }

    pub fn head_oid(&self) -> &ObjectId {
        &self.state.head
    }

    pub fn head_commit(&self) -> VcResult<Commit> {
        self.commits.load(&self.state.head)
    }

    pub fn staging(&self) -> &StagingArea {
        &self.state.staging
    }

    pub fn branches(&self) -> &BranchTable {
        &self.state.branches
    }

    /// Load a commit by full hash or unique abbreviation
    pub fn resolve_commit(&self, revision: &str) -> VcResult<Commit> {
        let oid = self.commits.resolve(revision)?;
        self.commits.load(&oid)
    }

    /// Make the working directory match `target`
    pub(crate) fn reconcile_workspace(&self, target: &FileSet) -> VcResult<()> {
        let migration = Migration::plan(&self.workspace, &self.blobs, target)?;
        self.workspace.apply_migration(&migration)
    }
}
