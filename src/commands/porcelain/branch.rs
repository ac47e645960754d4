use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    pub name: BranchName,
    pub head: ObjectId,
    pub is_current: bool,
}

impl Repository {
    /// List branches in name order
    pub fn list_branches(&self) -> Vec<BranchEntry> {
        self.branches()
            .heads()
            .iter()
            .map(|(name, head)| BranchEntry {
                name: name.clone(),
                head: head.clone(),
                is_current: name == self.current_branch(),
            })
            .collect()
    }

    /// Delete a branch and its fork-point record
    ///
    /// Branches forked from it keep their ancestry through its fork-point
    /// commits, so deletion is refused while any of them exist.
    pub fn delete_branch(&mut self, name: &str) -> VcResult<ObjectId> {
        let (branch, _) = self.branches().try_head(name)?;

        if &branch == self.current_branch() {
            return Err(VcError::CannotDeleteCurrent(branch));
        }

        let descendants = self.descendants_of(&branch)?;
        if !descendants.is_empty() {
            return Err(VcError::BranchHasDescendants {
                branch,
                descendants: descendants.iter().map(ToString::to_string).collect(),
            });
        }

        let head = self
            .state_mut()
            .branches
            .remove_branch(&branch)
            .ok_or_else(|| VcError::BranchNotFound(name.to_string()))?;

        Ok(head)
    }

    /// Branches whose fork point was committed on `branch`
    fn descendants_of(&self, branch: &BranchName) -> VcResult<Vec<BranchName>> {
        let mut descendants = Vec::new();

        for (name, fork_point) in self.branches().fork_points() {
            if name == branch {
                continue;
            }
            if self.commits().load(fork_point)?.branch() == branch {
                descendants.push(name.clone());
            }
        }

        Ok(descendants)
    }
}
