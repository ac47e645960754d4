//! Branch table
//!
//! Branches are human-readable names pointing at their head commit. Next to
//! the heads the table keeps, for every branch created with `checkout -b`,
//! its fork point: the commit that was HEAD when the branch was created. The
//! commit's own `branch` field then names the branch it was forked from, which
//! is what the merge ancestry walk follows.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    /// Branch name mapped to its head commit
    heads: BTreeMap<BranchName, ObjectId>,
    /// Branch name mapped to the commit it was created at
    fork_points: BTreeMap<BranchName, ObjectId>,
}

impl BranchTable {
    pub fn contains(&self, name: &BranchName) -> bool {
        self.heads.contains_key(name)
    }

    pub fn head(&self, name: &BranchName) -> Option<&ObjectId> {
        self.heads.get(name)
    }

    /// Look up a branch head by an unvalidated name
    pub fn try_head(&self, name: &str) -> VcResult<(BranchName, ObjectId)> {
        let branch = BranchName::try_parse(name)
            .map_err(|_| VcError::BranchNotFound(name.to_string()))?;

        self.heads
            .get(&branch)
            .cloned()
            .map(|head| (branch, head))
            .ok_or_else(|| VcError::BranchNotFound(name.to_string()))
    }

    pub fn fork_point(&self, name: &BranchName) -> Option<&ObjectId> {
        self.fork_points.get(name)
    }

    pub fn heads(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.heads
    }

    pub fn fork_points(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.fork_points
    }

    pub fn names(&self) -> impl Iterator<Item = &BranchName> {
        self.heads.keys()
    }

    /// Move (or create) a branch head
    pub fn set_head(&mut self, name: BranchName, oid: ObjectId) {
        tracing::debug!(branch = %name, head = %oid, "updated branch head");
        self.heads.insert(name, oid);
    }

    /// Create a branch at `oid`, recording `oid` as its fork point
    pub fn create_branch(&mut self, name: BranchName, oid: ObjectId) -> VcResult<()> {
        if self.heads.contains_key(&name) {
            return Err(VcError::BranchExists(name));
        }

        tracing::info!(branch = %name, fork_point = %oid, "created branch");
        self.fork_points.insert(name.clone(), oid.clone());
        self.heads.insert(name, oid);

        Ok(())
    }

    /// Drop a branch and its fork-point record
    pub fn remove_branch(&mut self, name: &BranchName) -> Option<ObjectId> {
        self.fork_points.remove(name);
        let head = self.heads.remove(name);

        if head.is_some() {
            tracing::info!(branch = %name, "removed branch");
        }
        head
    }
}
