//! Nearest common ancestor search
//!
//! Used by merge when the split-point index has no entry for a pair of
//! branches. The search walks both parent links of both commits at once:
//!
//! - Process commits newest first (a max-heap keyed by timestamp)
//! - Mark commits as visited from the source side, the target side, or both
//! - A commit visited from both sides is a common ancestor; everything below
//!   it is marked STALE so the walk does not descend further
//!
//! Among the surviving common ancestors, any one that is itself an ancestor of
//! another is redundant. One of the remaining best ancestors is returned.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100;
        const RESULT = 0b1000;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the nearest common ancestor of two commits
///
/// Generic over the commit loader so it works against the object store as
/// well as an in-memory graph.
pub struct AncestorFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> AncestorFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    fn find_common_ancestors(
        &self,
        source_commit_id: &ObjectId,
        target_commit_ids: &HashSet<&ObjectId>,
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        if target_commit_ids.contains(source_commit_id) {
            return Ok(HashMap::from([(
                source_commit_id.clone(),
                VisitState::RESULT | VisitState::VISITED_FROM_BOTH,
            )]));
        }

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        let source_commit = (self.commit_loader)(source_commit_id)?;
        ancestors_states.insert(source_commit.oid.clone(), VisitState::VISITED_FROM_SOURCE);
        priority_queue.push(source_commit);

        for &target_commit_id in target_commit_ids {
            ancestors_states.insert(target_commit_id.clone(), VisitState::VISITED_FROM_TARGET);
            priority_queue.push((self.commit_loader)(target_commit_id)?);
        }

        while let Some(current_commit) = priority_queue.pop() {
            let current_state = ancestors_states
                .get(&current_commit.oid)
                .copied()
                .unwrap_or(VisitState::NONE);

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = current_state.contains(VisitState::VISITED_FROM_BOTH);
            if is_common_ancestor {
                ancestors_states
                    .entry(current_commit.oid.clone())
                    .and_modify(|state| *state |= VisitState::RESULT);
            }

            for parent_id in &current_commit.parents {
                let parent_state = ancestors_states
                    .get(parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if !parent_state.contains(new_state) {
                    ancestors_states.insert(parent_id.clone(), new_state);
                    priority_queue.push((self.commit_loader)(parent_id)?);
                }
            }
        }

        tracing::trace!(states = ?ancestors_states, "common ancestor walk finished");

        Ok(ancestors_states
            .into_iter()
            .filter(|(_, state)| {
                !state.contains(VisitState::STALE) && state.contains(VisitState::RESULT)
            })
            .collect())
    }

    /// Nearest common ancestor of `source_commit_id` and `target_commit_id`
    ///
    /// Returns `None` when the two histories share no commit.
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let common_ancestors = self
            .find_common_ancestors(source_commit_id, &HashSet::from([target_commit_id]))?
            .into_keys()
            .collect::<HashSet<_>>();

        let mut redundant_ancestors = HashSet::<ObjectId>::new();
        for commit in &common_ancestors {
            if redundant_ancestors.contains(commit) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .filter(|other| *other != commit && !redundant_ancestors.contains(*other))
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }
            let common_states = self.find_common_ancestors(commit, &others)?;

            if common_states
                .get(commit)
                .is_some_and(|state| state.contains(VisitState::VISITED_FROM_TARGET))
            {
                redundant_ancestors.insert(commit.clone());
            }

            for other in others {
                if common_states
                    .get(other)
                    .is_some_and(|state| state.contains(VisitState::VISITED_FROM_SOURCE))
                {
                    redundant_ancestors.insert(other.clone());
                }
            }
        }

        let mut best_common_ancestors = common_ancestors
            .into_iter()
            .filter(|commit| !redundant_ancestors.contains(commit))
            .collect::<Vec<_>>();
        best_common_ancestors.sort();

        Ok(best_common_ancestors.into_iter().next())
    }
}
