use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Move head to the commit whose id starts with `prefix`
    ///
    /// The commit is appended to the current lineage, so nothing is dropped
    /// from the branch's history.
    pub fn reset(&mut self, prefix: &str) -> anyhow::Result<ObjectId> {
        let oid = self.commits().resolve_short_id(prefix)?;
        let target_files = self.database().get_commit(&oid)?.files().clone();

        self.apply_file_map(&target_files)?;

        let state = self.state_mut();
        state.refs.advance(oid.clone())?;
        state.index.clear();

        self.persist()?;
        Ok(oid)
    }
}
