use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::ensure_no_untracked_overwrite;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Restore `path` from the head commit; the staging area is left alone
    pub fn checkout_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let head = self.head()?.clone();
        self.restore_file(&head, path)
    }

    /// Restore `path` from the commit whose id starts with `prefix`
    pub fn checkout_file_at(&mut self, prefix: &str, path: &Path) -> anyhow::Result<()> {
        let oid = self.commits().resolve_short_id(prefix)?;
        self.restore_file(&oid, path)
    }

    /// Switch to `name`, replacing the working tree with its tip's files
    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;
        let target = self.refs().checkout_target(&name)?.clone();
        let target_files = self.database().get_commit(&target)?.files().clone();

        self.apply_file_map(&target_files)?;

        let state = self.state_mut();
        state.refs.switch_to(name)?;
        state.index.clear();

        self.persist()
    }

    fn restore_file(&mut self, oid: &ObjectId, path: &Path) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(path)?;
        let commit = self.database().get_commit(oid)?;
        let blob_id = commit
            .file(&path)
            .ok_or_else(|| RepositoryError::FileNotInCommit {
                path: path.clone(),
                commit: oid.clone(),
            })?;

        let content = self.database().get_blob(blob_id)?;
        self.workspace().write_file(&path, &content)?;

        tracing::debug!(path = %path.display(), commit = %oid, "restored file");
        Ok(())
    }

    /// Replace head's files in the working tree with `target_files`
    ///
    /// Refuses, touching nothing, when an untracked file would be overwritten.
    pub(crate) fn apply_file_map(&self, target_files: &FileMap) -> anyhow::Result<()> {
        let head_files = self.head_files()?;
        let workspace_files = self.workspace().list_files()?;
        ensure_no_untracked_overwrite(&workspace_files, &head_files, self.index(), target_files)?;

        let migration = Migration::plan(self.database(), &head_files, target_files)?;
        self.workspace().apply_migration(&migration)
    }
}
