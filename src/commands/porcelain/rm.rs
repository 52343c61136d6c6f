use crate::areas::index::RemoveOutcome;
use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Unstage `path`, or stage its removal and delete it when head tracks it
    pub fn remove(&mut self, path: &Path) -> anyhow::Result<RemoveOutcome> {
        let path = self.workspace().relative_path(path)?;
        let tracked_in_head = self.head_commit()?.file(&path).is_some();

        let outcome = self.state_mut().index.stage_remove(&path, tracked_in_head)?;
        if outcome == RemoveOutcome::StagedForRemoval {
            self.workspace().remove_file(&path)?;
        }

        self.persist()?;
        Ok(outcome)
    }
}
