//! Checkout migration
//!
//! Moving the working tree from the head commit's files to a target file map
//! is planned before anything is touched:
//!
//! 1. Every target path is written (Add when head does not track it, Modify
//!    otherwise)
//! 2. Every head path missing from the target is deleted
//!
//! All blob contents are loaded during planning, so a missing or corrupt
//! object aborts the checkout before the first write.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::FileMap;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::PathBuf;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Overwrite a file head already tracks
    Modify,
}

/// Planned actions grouped by type; deletions carry no content
pub type ActionsSet = HashMap<ActionType, Vec<(PathBuf, Option<Bytes>)>>;

#[derive(Debug)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    pub fn plan(database: &Database, head_files: &FileMap, target_files: &FileMap) -> anyhow::Result<Self> {
        let mut actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for (path, blob_id) in target_files {
            let action = if head_files.contains_key(path) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            let data = database.get_blob(blob_id)?;

            actions
                .entry(action)
                .or_default()
                .push((path.clone(), Some(data)));
        }

        for path in head_files.keys().filter(|path| !target_files.contains_key(*path)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((path.clone(), None));
        }

        Ok(Migration { actions })
    }

    pub fn actions(&self, action: ActionType) -> &[(PathBuf, Option<Bytes>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
