use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Record the staged changes as a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }
        if self.index().is_empty() {
            return Err(RepositoryError::EmptyStage.into());
        }

        let parent = self.head()?.clone();
        let oid = self.build_commit(message, parent, None)?;

        self.persist()?;
        Ok(oid)
    }

    /// Build a commit from head's files and the staging area, advance head and clear the stage
    ///
    /// Unlike `commit` this never rejects an empty stage, so merges always
    /// get their commit.
    pub(crate) fn build_commit(
        &mut self,
        message: &str,
        parent: ObjectId,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let head_files = self.head_files()?;
        let timestamp = self.now();

        let (database, state) = self.database_and_state_mut();
        let files = state.index.build_file_map(database, &head_files)?;
        let (oid, _) = state.commits.create(
            database,
            message,
            Some(parent),
            files,
            merge_parent,
            timestamp,
        )?;

        state.refs.advance(oid.clone())?;
        state.index.clear();

        Ok(oid)
    }

    pub fn print_commit(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().get_commit(oid)?;
        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch(),
            oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
