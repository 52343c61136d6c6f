use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub branches: Vec<BranchName>,
    pub current_branch: BranchName,
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    workspace: &'r Workspace,
    index: &'r Index,
    head_files: &'r FileMap,
}

impl Status<'_> {
    pub fn initialize(
        &self,
        branches: Vec<BranchName>,
        current_branch: BranchName,
    ) -> anyhow::Result<StatusInfo> {
        let workspace_files = self.workspace.list_files()?;

        Ok(StatusInfo {
            branches,
            current_branch,
            staged_files: self.index.additions().keys().cloned().collect(),
            removed_files: self.index.removals().clone(),
            workspace_changeset: self.detect_workspace_changes()?,
            untracked_files: self.collect_untracked_files(&workspace_files),
        })
    }

    // Staged files are compared with their staged content, the rest of head
    // with the committed content. Files staged for removal are skipped.
    fn detect_workspace_changes(&self) -> anyhow::Result<ChangeSet> {
        let inspector = Inspector::new(self.workspace);
        let mut changes = ChangeSet::new();

        for (path, content) in self.index.additions() {
            let staged_blob = Blob::new(content.clone()).object_id()?;
            if let Some(change) = inspector.check_against_workspace(path, &staged_blob)? {
                changes.insert(path.clone(), change);
            }
        }

        let committed_only = self.head_files.iter().filter(|(path, _)| {
            !self.index.is_staged_for_addition(path) && !self.index.is_staged_for_removal(path)
        });
        for (path, blob_id) in committed_only {
            if let Some(change) = inspector.check_against_workspace(path, blob_id)? {
                changes.insert(path.clone(), change);
            }
        }

        Ok(changes)
    }

    fn collect_untracked_files(&self, workspace_files: &[PathBuf]) -> FileSet {
        workspace_files
            .iter()
            .filter(|path| !self.index.is_staged_for_addition(path))
            .filter(|path| {
                !self.head_files.contains_key(*path) || self.index.is_staged_for_removal(path)
            })
            .cloned()
            .collect()
    }
}
