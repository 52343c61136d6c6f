use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
}

impl Inspector<'_> {
    /// Compare the file on disk with the blob it is expected to hold
    pub fn check_against_workspace(
        &self,
        path: &Path,
        expected: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if !self.workspace.exists(path) {
            return Ok(Some(WorkspaceChangeType::Deleted));
        }

        let content = self.workspace.read_file(path)?;
        if &Blob::new(content).object_id()? != expected {
            Ok(Some(WorkspaceChangeType::Modified))
        } else {
            Ok(None)
        }
    }
}
