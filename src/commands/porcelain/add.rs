use crate::areas::index::AddOutcome;
use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Stage the working-tree content of `path`
    pub fn add(&mut self, path: &Path) -> anyhow::Result<AddOutcome> {
        let path = self.workspace().relative_path(path)?;
        let content = self.workspace().read_file(&path)?;
        let head_blob = self.head_commit()?.file(&path).cloned();

        let outcome = self
            .state_mut()
            .index
            .stage_add(&path, content, head_blob.as_ref())?;

        self.persist()?;
        Ok(outcome)
    }
}
