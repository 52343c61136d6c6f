//! Untracked-overwrite guard
//!
//! A file on disk that head does not track and that is not staged for
//! addition is untracked. Checkout, reset and merge refuse to run when the
//! target file map would overwrite such a file.

use crate::areas::index::Index;
use crate::artifacts::objects::commit::FileMap;
use crate::errors::RepositoryError;
use std::path::PathBuf;

pub fn untracked_files<'w>(
    workspace_files: &'w [PathBuf],
    head_files: &FileMap,
    index: &Index,
) -> impl Iterator<Item = &'w PathBuf> {
    workspace_files
        .iter()
        .filter(|path| !head_files.contains_key(*path) && !index.is_staged_for_addition(path))
}

/// Fail with `UntrackedOverwrite` if applying `target_files` would clobber an untracked file
pub fn ensure_no_untracked_overwrite(
    workspace_files: &[PathBuf],
    head_files: &FileMap,
    index: &Index,
    target_files: &FileMap,
) -> anyhow::Result<()> {
    let in_the_way = untracked_files(workspace_files, head_files, index)
        .filter(|path| target_files.contains_key(*path))
        .cloned()
        .collect::<Vec<_>>();

    if in_the_way.is_empty() {
        Ok(())
    } else {
        tracing::debug!(paths = ?in_the_way, "untracked files in the way");
        Err(RepositoryError::UntrackedOverwrite(in_the_way).into())
    }
}
