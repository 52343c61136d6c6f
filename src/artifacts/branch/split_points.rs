//! Split-point index
//!
//! For every pair of branches the index remembers the commit at which their
//! histories last diverged (their most recent common ancestor). Entries are
//! kept up to date as branches are created, merged and deleted, so a merge
//! normally finds its base without walking the graph.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Unordered pair of branch names
///
/// The names are stored sorted, so `{a, b}` and `{b, a}` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchPair(BranchName, BranchName);

impl BranchPair {
    pub fn new(first: BranchName, second: BranchName) -> Self {
        if first <= second {
            BranchPair(first, second)
        } else {
            BranchPair(second, first)
        }
    }

    pub fn names(&self) -> (&BranchName, &BranchName) {
        (&self.0, &self.1)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        &self.0 == name || &self.1 == name
    }

    /// The member of the pair that is not `name`
    pub fn other(&self, name: &BranchName) -> Option<&BranchName> {
        if &self.0 == name {
            Some(&self.1)
        } else if &self.1 == name {
            Some(&self.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitPoints {
    entries: BTreeMap<BranchPair, ObjectId>,
}

impl SplitPoints {
    pub fn get(&self, first: &BranchName, second: &BranchName) -> Option<&ObjectId> {
        self.entries
            .get(&BranchPair::new(first.clone(), second.clone()))
    }

    pub fn set(&mut self, first: &BranchName, second: &BranchName, oid: ObjectId) {
        tracing::debug!(%first, %second, split = %oid, "recorded split point");
        self.entries
            .insert(BranchPair::new(first.clone(), second.clone()), oid);
    }

    /// Record the split points of `new`, forked from `current` at `head`
    ///
    /// `new` splits from `current` at `head`, and from every other branch at
    /// the same commit `current` does.
    pub fn fork(&mut self, current: &BranchName, new: &BranchName, head: &ObjectId) {
        let inherited = self
            .entries
            .iter()
            .filter_map(|(pair, oid)| {
                pair.other(current)
                    .filter(|other| *other != new)
                    .map(|other| (other.clone(), oid.clone()))
            })
            .collect::<Vec<_>>();

        self.set(current, new, head.clone());
        for (other, oid) in inherited {
            self.set(&other, new, oid);
        }
    }

    /// Forget every entry mentioning `name`
    pub fn purge(&mut self, name: &BranchName) {
        self.entries.retain(|pair, _| !pair.contains(name));
    }

    /// Update the index after `other` has been merged into `current`
    ///
    /// The new split point of the pair is `branch_tip`, the tip of `other`.
    /// Every branch that split from `other` at that same tip now also splits
    /// from `current` there.
    pub fn record_merge(&mut self, current: &BranchName, other: &BranchName, branch_tip: &ObjectId) {
        let propagated = self
            .entries
            .iter()
            .filter(|(_, oid)| *oid == branch_tip)
            .filter_map(|(pair, _)| pair.other(other))
            .filter(|third| *third != current)
            .cloned()
            .collect::<Vec<_>>();

        self.set(current, other, branch_tip.clone());
        for third in propagated {
            self.set(current, &third, branch_tip.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BranchPair, &ObjectId)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(BranchPair, ObjectId)> for SplitPoints {
    fn from_iter<T: IntoIterator<Item = (BranchPair, ObjectId)>>(iter: T) -> Self {
        SplitPoints {
            entries: iter.into_iter().collect(),
        }
    }
}
