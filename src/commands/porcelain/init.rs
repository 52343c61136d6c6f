use crate::areas::repository::{REPOSITORY_DIR, Repository};

impl Repository {
    pub fn print_initialized(&self) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "Initialized empty twig repository in {}",
            self.path().join(REPOSITORY_DIR).display()
        )?;

        Ok(())
    }
}
