//! Lazy commit history iterators
//!
//! - [`FirstParentRevList`] follows only first parents, newest to oldest (log)
//! - [`ReachableRevList`] follows both parent links breadth first, yielding each
//!   commit once

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::{HashSet, VecDeque};

#[derive(new)]
pub struct FirstParentRevList<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for FirstParentRevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.get_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // the walk ends after reporting a broken link
            Err(error) => Some(Err(error)),
        }
    }
}

pub struct ReachableRevList<'r> {
    database: &'r Database,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
}

impl<'r> ReachableRevList<'r> {
    pub fn new(database: &'r Database, start: ObjectId) -> Self {
        Self {
            database,
            queue: VecDeque::from([start.clone()]),
            seen: HashSet::from([start]),
        }
    }
}

impl Iterator for ReachableRevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.queue.pop_front()?;

        match self.database.get_commit(&commit_oid) {
            Ok(commit) => {
                for parent in commit.parents() {
                    if self.seen.insert(parent.clone()) {
                        self.queue.push_back(parent);
                    }
                }
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => {
                self.queue.clear();
                Some(Err(error))
            }
        }
    }
}
