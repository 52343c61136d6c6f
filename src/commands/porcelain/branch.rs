use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch at the current head
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;
        self.state_mut().refs.create_branch(name)?;

        self.persist()
    }

    pub fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(name.to_string()))?;
        self.state_mut().refs.delete_branch(&name)?;

        self.persist()
    }
}
