//! Fork-point ancestry walk
//!
//! Every branch created with `checkout -b` remembers the commit HEAD pointed
//! at when it was created. That commit was made on some other branch, so
//! following fork points hops from a branch to the branch it was forked from.
//! The walk from `other` stops at the first fork point made on `current`,
//! which is the three-way merge base.
//!
//! ```text
//!  master:  C0 ── C1 ── C2
//!            \
//!  feature:   F1 ── F2          fork_points[feature] = C0 (made on master)
//!              \
//!  topic:       T1              fork_points[topic] = F1 (made on feature)
//! ```
//!
//! Merging `topic` into `master` walks topic → F1 (feature) → C0 (master) and
//! lands on C0. When the forward walk fails the reverse direction is tried,
//! so merging `master` into `topic` finds C0 as well.

use crate::areas::refs::BranchTable;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{VcError, VcResult};
use std::collections::HashSet;

/// Finds the merge base of two branches by walking fork points
///
/// The walk only needs to know which branch a commit was made on, so the
/// commit store is hidden behind `branch_of`.
pub struct ForkWalk<'t, BranchOfFn>
where
    BranchOfFn: Fn(&ObjectId) -> VcResult<BranchName>,
{
    branches: &'t BranchTable,
    branch_of: BranchOfFn,
}

impl<'t, BranchOfFn> ForkWalk<'t, BranchOfFn>
where
    BranchOfFn: Fn(&ObjectId) -> VcResult<BranchName>,
{
    pub fn new(branches: &'t BranchTable, branch_of: BranchOfFn) -> Self {
        Self {
            branches,
            branch_of,
        }
    }

    /// Find the common ancestor of `current` and `other`
    pub fn common_ancestor(&self, current: &BranchName, other: &BranchName) -> VcResult<ObjectId> {
        if let Some(ancestor) = self.walk(other, current)? {
            return Ok(ancestor);
        }
        if let Some(ancestor) = self.walk(current, other)? {
            return Ok(ancestor);
        }

        Err(VcError::NoCommonAncestor {
            current: current.to_string(),
            other: other.to_string(),
        })
    }

    /// Hop through fork points from `from` until one made on `to` is found
    fn walk(&self, from: &BranchName, to: &BranchName) -> VcResult<Option<ObjectId>> {
        let mut visited = HashSet::from([from.clone()]);
        let mut branch = from.clone();

        while let Some(fork_point) = self.branches.fork_point(&branch) {
            let parent = (self.branch_of)(fork_point)?;
            tracing::debug!(%branch, %fork_point, %parent, "followed fork point");

            if &parent == to {
                return Ok(Some(fork_point.clone()));
            }
            if !visited.insert(parent.clone()) {
                tracing::warn!(%parent, "fork point chain loops back on itself");
                return Ok(None);
            }

            branch = parent;
        }

        Ok(None)
    }
}
