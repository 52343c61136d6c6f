//! Branch references
//!
//! Each branch owns an append-only lineage: the sequence of commits its tip
//! has pointed at, oldest first. The tip (and, for the current branch, HEAD)
//! is the last element. Moving a branch never rewrites its lineage; reset and
//! fast-forward append the new tip instead.
//!
//! The split-point index lives here as well, since every branch operation
//! has to keep it in step.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::split_points::SplitPoints;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::collections::BTreeMap;

pub type Lineage = Vec<ObjectId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    current: BranchName,
    branches: BTreeMap<BranchName, Lineage>,
    split_points: SplitPoints,
}

impl Refs {
    /// A single default branch whose lineage is just `root`
    pub fn new(root: ObjectId) -> Self {
        let current = BranchName::default_branch();
        Refs {
            branches: BTreeMap::from([(current.clone(), vec![root])]),
            current,
            split_points: SplitPoints::default(),
        }
    }

    pub fn from_parts(
        current: BranchName,
        branches: BTreeMap<BranchName, Lineage>,
        split_points: SplitPoints,
    ) -> anyhow::Result<Self> {
        match branches.get(&current) {
            Some(lineage) if !lineage.is_empty() => {}
            _ => anyhow::bail!("Current branch {current} has no commits"),
        }
        if let Some((name, _)) = branches.iter().find(|(_, lineage)| lineage.is_empty()) {
            anyhow::bail!("Branch {name} has an empty lineage");
        }

        Ok(Refs {
            current,
            branches,
            split_points,
        })
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    /// Tip of the current branch
    pub fn head(&self) -> anyhow::Result<&ObjectId> {
        self.tip(&self.current)
            .context("Current branch has no commits")
    }

    pub fn tip(&self, name: &BranchName) -> anyhow::Result<&ObjectId> {
        self.lineage(name)?
            .last()
            .with_context(|| format!("Branch {name} has no commits"))
    }

    pub fn lineage(&self, name: &BranchName) -> anyhow::Result<&[ObjectId]> {
        self.branches
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()).into())
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    /// Branch names in sorted order
    pub fn branch_names(&self) -> impl Iterator<Item = &BranchName> {
        self.branches.keys()
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, Lineage> {
        &self.branches
    }

    pub fn split_points(&self) -> &SplitPoints {
        &self.split_points
    }

    pub fn split_points_mut(&mut self) -> &mut SplitPoints {
        &mut self.split_points
    }

    /// Create `name` at the current head
    pub fn create_branch(&mut self, name: BranchName) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()).into());
        }

        let head = self.head()?.clone();
        self.split_points.fork(&self.current, &name, &head);
        self.branches.insert(name.clone(), vec![head.clone()]);

        tracing::debug!(branch = %name, at = %head, "created branch");
        Ok(())
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(name) {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }
        if name == &self.current {
            return Err(RepositoryError::IsCurrentBranch(name.to_string()).into());
        }

        self.branches.remove(name);
        self.split_points.purge(name);

        tracing::debug!(branch = %name, "deleted branch");
        Ok(())
    }

    /// Validate a branch switch, returning the tip to check out
    pub fn checkout_target(&self, name: &BranchName) -> anyhow::Result<&ObjectId> {
        if !self.branches.contains_key(name) {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }
        if name == &self.current {
            return Err(RepositoryError::AlreadyOnBranch(name.to_string()).into());
        }

        self.tip(name)
    }

    pub fn switch_to(&mut self, name: BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            return Err(RepositoryError::BranchNotFound(name.to_string()).into());
        }

        tracing::debug!(from = %self.current, to = %name, "switched branch");
        self.current = name;
        Ok(())
    }

    /// Append `oid` to the current branch's lineage, making it the new head
    pub fn advance(&mut self, oid: ObjectId) -> anyhow::Result<()> {
        let lineage = self
            .branches
            .get_mut(&self.current)
            .with_context(|| format!("Current branch {} is missing", self.current))?;

        tracing::debug!(branch = %self.current, head = %oid, "advanced branch");
        lineage.push(oid);
        Ok(())
    }
}
