use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use colored::Colorize;

impl Repository {
    pub fn status(&self) -> anyhow::Result<StatusInfo> {
        let head_files = self.head_files()?;
        let branches = self.refs().branch_names().cloned().collect();

        Status::new(self.workspace(), self.index(), &head_files)
            .initialize(branches, self.refs().current_branch().clone())
    }

    pub fn print_status(&self, status: &StatusInfo) -> anyhow::Result<()> {
        writeln!(self.writer(), "=== Branches ===")?;
        for branch in &status.branches {
            if branch == &status.current_branch {
                writeln!(self.writer(), "{}", format!("*{branch}").green())?;
            } else {
                writeln!(self.writer(), "{branch}")?;
            }
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Staged Files ===")?;
        for path in &status.staged_files {
            writeln!(self.writer(), "{}", path.display().to_string().green())?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Removed Files ===")?;
        for path in &status.removed_files {
            writeln!(self.writer(), "{}", path.display().to_string().red())?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &status.workspace_changeset {
            writeln!(self.writer(), "{} ({})", path.display(), change)?;
        }
        writeln!(self.writer())?;

        writeln!(self.writer(), "=== Untracked Files ===")?;
        for path in &status.untracked_files {
            writeln!(self.writer(), "{}", path.display())?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
