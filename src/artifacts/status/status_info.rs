use crate::areas::index::StagingArea;
use crate::areas::refs::BranchTable;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::FileSet;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcResult;
use std::collections::{BTreeMap, BTreeSet};

/// How a tracked working file differs from what the next commit records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceChange {
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub branches: Vec<BranchName>,
    pub current_branch: BranchName,
    pub staged: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub unstaged: BTreeMap<String, WorkspaceChange>,
    pub untracked: BTreeSet<String>,
}

impl StatusInfo {
    pub fn inspect(
        workspace: &Workspace,
        head_files: &FileSet,
        staging: &StagingArea,
        branches: &BranchTable,
        current_branch: &BranchName,
    ) -> VcResult<Self> {
        let expected = staging.snapshot(head_files);
        let working = workspace.list_files()?;

        let mut unstaged = BTreeMap::new();
        for (file_name, oid) in &expected {
            if !workspace.file_exists(file_name) {
                unstaged.insert(file_name.clone(), WorkspaceChange::Deleted);
            } else if ObjectId::digest(&workspace.read_file(file_name)?) != *oid {
                unstaged.insert(file_name.clone(), WorkspaceChange::Modified);
            }
        }

        let untracked = working
            .into_iter()
            .filter(|file_name| {
                !expected.contains_key(file_name) && !staging.removed().contains(file_name)
            })
            .collect();

        Ok(StatusInfo {
            branches: branches.names().cloned().collect(),
            current_branch: current_branch.clone(),
            staged: staging.staged().keys().cloned().collect(),
            removed: staging.removed().clone(),
            unstaged,
            untracked,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.unstaged.is_empty()
            && self.untracked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::workspace::REPOSITORY_DIR;
    use crate::config::WorkspaceConfig;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn sorts_files_into_their_sections() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().canonicalize().unwrap();
        let workspace = Workspace::new(
            root.clone().into_boxed_path(),
            root.join(REPOSITORY_DIR).join("tmp").into_boxed_path(),
            WorkspaceConfig::default(),
        );

        std::fs::write(root.join("clean.txt"), "clean").unwrap();
        std::fs::write(root.join("edited.txt"), "edited").unwrap();
        std::fs::write(root.join("new.txt"), "new").unwrap();
        std::fs::write(root.join("stray.md"), "stray").unwrap();

        let head_files: FileSet = [
            ("clean.txt", "clean"),
            ("edited.txt", "original"),
            ("gone.txt", "gone"),
            ("dropped.txt", "dropped"),
        ]
        .into_iter()
        .map(|(name, content)| (name.to_string(), ObjectId::digest(content.as_bytes())))
        .collect();

        let mut staging = StagingArea::default();
        staging.stage("new.txt".to_string(), ObjectId::digest(b"new"));
        staging.remove("dropped.txt");

        let master = BranchName::try_parse("master").unwrap();
        let mut branches = BranchTable::default();
        branches.set_head(master.clone(), ObjectId::digest(b"c0"));

        let status =
            StatusInfo::inspect(&workspace, &head_files, &staging, &branches, &master).unwrap();

        assert_eq!(status.branches, vec![master]);
        assert_eq!(status.staged, BTreeSet::from(["new.txt".to_string()]));
        assert_eq!(status.removed, BTreeSet::from(["dropped.txt".to_string()]));
        assert_eq!(
            status.unstaged,
            BTreeMap::from([
                ("edited.txt".to_string(), WorkspaceChange::Modified),
                ("gone.txt".to_string(), WorkspaceChange::Deleted),
            ])
        );
        assert_eq!(status.untracked, BTreeSet::from(["stray.md".to_string()]));
        assert!(!status.is_clean());
    }
}
