//! Commit graph
//!
//! Commits are immutable records stored in the object store; they form a DAG
//! through their parent links. The graph additionally remembers every commit
//! it has created, in creation order, so global history and short-id lookup
//! never need to scan the object directory.

use crate::areas::database::Database;
use crate::artifacts::log::rev_list::{FirstParentRevList, ReachableRevList};
use crate::artifacts::merge::ancestor_finder::AncestorFinder;
use crate::artifacts::objects::commit::{Commit, FileMap};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    known: Vec<ObjectId>,
    known_set: HashSet<ObjectId>,
}

impl CommitGraph {
    pub fn from_known(known: Vec<ObjectId>) -> Self {
        let known_set = known.iter().cloned().collect();
        Self { known, known_set }
    }

    /// Store a new commit and remember its ID
    ///
    /// Creating a commit identical to an existing one yields the existing ID
    /// and does not record it twice.
    pub fn create(
        &mut self,
        database: &Database,
        message: &str,
        parent: Option<ObjectId>,
        files: FileMap,
        merge_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let commit = Commit::new(parent, merge_parent, timestamp, files, message.to_string());
        let oid = database.put_commit(&commit)?;
        self.record(oid.clone());

        tracing::debug!(oid = %oid, message, "created commit");
        Ok((oid, commit))
    }

    pub fn record(&mut self, oid: ObjectId) {
        if self.known_set.insert(oid.clone()) {
            self.known.push(oid);
        }
    }

    /// Every commit ever created, oldest first
    pub fn known(&self) -> &[ObjectId] {
        &self.known
    }

    /// First-parent history starting with `oid` itself
    pub fn ancestors_of<'r>(&self, database: &'r Database, oid: &ObjectId) -> FirstParentRevList<'r> {
        FirstParentRevList::new(database, Some(oid.clone()))
    }

    /// Every commit reachable from `oid` through either parent link
    pub fn reachable_from<'r>(&self, database: &'r Database, oid: &ObjectId) -> ReachableRevList<'r> {
        ReachableRevList::new(database, oid.clone())
    }

    /// Resolve an abbreviated commit ID
    ///
    /// Fails unless exactly one known commit starts with `prefix`.
    pub fn resolve_short_id(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self.known.iter().filter(|oid| oid.matches_prefix(prefix));

        match (matches.next(), matches.next()) {
            (Some(oid), None) => Ok(oid.clone()),
            _ => Err(RepositoryError::AmbiguousOrNotFound(prefix.to_string()).into()),
        }
    }

    /// Graph search for the nearest commit that both `first` and `second` descend from
    pub fn nearest_common_ancestor(
        &self,
        database: &Database,
        first: &ObjectId,
        second: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        AncestorFinder::new(|oid| database.get_slim_commit(oid))
            .find_best_common_ancestor(first, second)
    }
}
