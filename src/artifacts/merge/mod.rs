//! Three-way merge
//!
//! - `ancestor_finder`: graph search for the nearest common ancestor, used
//!   when the split-point index has no entry for a pair of branches
//! - `resolution`: the per-file decision table and conflict file content

pub mod ancestor_finder;
pub mod resolution;

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// What a merge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A merge commit was recorded without conflicts
    Clean { commit: ObjectId },
    /// A merge commit was recorded; the listed paths hold conflict markers
    Conflict {
        commit: ObjectId,
        paths: Vec<PathBuf>,
    },
    /// The current branch moved to the other branch's tip; no commit was made
    FastForwarded { tip: ObjectId },
    /// The other branch's tip is already part of the current history
    AlreadyAncestor,
}
