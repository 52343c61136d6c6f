//! Staging area
//!
//! Pending changes relative to the head commit:
//!
//! - `additions`: path -> raw bytes to record in the next commit
//! - `removals`: paths to drop from the next commit
//!
//! A path is never in both sets. The staging area is cleared after every
//! successful commit, checkout, reset and merge. It has no file of its own;
//! it is persisted as part of the repository state snapshot.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Result of staging a file for addition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The content differs from the head commit and will be committed
    Staged,
    /// The content matches the head commit; nothing is pending for the path
    AlreadyCommitted,
}

/// Result of staging a file for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Only a pending addition was dropped
    Unstaged,
    /// The path is tracked by head and will be removed by the next commit
    StagedForRemoval,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    additions: BTreeMap<PathBuf, Bytes>,
    removals: BTreeSet<PathBuf>,
}

impl Index {
    pub fn from_parts(additions: BTreeMap<PathBuf, Bytes>, removals: BTreeSet<PathBuf>) -> Self {
        let mut index = Index::default();
        for path in removals {
            index.removals.insert(path);
        }
        for (path, content) in additions {
            index.removals.remove(&path);
            index.additions.insert(path, content);
        }
        index
    }

    /// Stage `content` for `path`
    ///
    /// When the content hashes to `head_blob` (the blob head records for the
    /// path), any pending addition is dropped instead. Either way the path
    /// leaves the removal set.
    pub fn stage_add(
        &mut self,
        path: &Path,
        content: Bytes,
        head_blob: Option<&ObjectId>,
    ) -> anyhow::Result<AddOutcome> {
        self.removals.remove(path);

        let blob_id = Blob::new(content.clone()).object_id()?;
        if head_blob == Some(&blob_id) {
            self.additions.remove(path);
            tracing::debug!(path = %path.display(), "content matches head, nothing staged");
            return Ok(AddOutcome::AlreadyCommitted);
        }

        self.additions.insert(path.to_path_buf(), content);
        tracing::debug!(path = %path.display(), blob = %blob_id, "staged for addition");
        Ok(AddOutcome::Staged)
    }

    /// Stage `path` for removal
    ///
    /// Fails with `NothingToRemove`, leaving the staging area unchanged, when
    /// the path is neither staged for addition nor tracked by head.
    pub fn stage_remove(
        &mut self,
        path: &Path,
        tracked_in_head: bool,
    ) -> anyhow::Result<RemoveOutcome> {
        let was_staged = self.additions.remove(path).is_some();

        if tracked_in_head {
            self.removals.insert(path.to_path_buf());
            tracing::debug!(path = %path.display(), "staged for removal");
            Ok(RemoveOutcome::StagedForRemoval)
        } else if was_staged {
            tracing::debug!(path = %path.display(), "unstaged");
            Ok(RemoveOutcome::Unstaged)
        } else {
            Err(RepositoryError::NothingToRemove(path.to_path_buf()).into())
        }
    }

    /// File map of the next commit: head's map, plus additions, minus removals
    ///
    /// Blobs for pending additions are written to the object store.
    pub fn build_file_map(&self, database: &Database, head_files: &FileMap) -> anyhow::Result<FileMap> {
        let mut files = head_files.clone();

        for (path, content) in &self.additions {
            let blob_id = database.put_blob(content.clone())?;
            files.insert(path.clone(), blob_id);
        }
        for path in &self.removals {
            files.remove(path);
        }

        Ok(files)
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, Bytes> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }
}
