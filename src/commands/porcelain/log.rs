use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

pub type LogEntry = (ObjectId, Commit);

impl Repository {
    /// First-parent history from head, newest first
    pub fn log(&self) -> anyhow::Result<Vec<LogEntry>> {
        self.commits()
            .ancestors_of(self.database(), self.head()?)
            .collect()
    }

    /// Every commit ever created, in creation order
    pub fn full_log(&self) -> anyhow::Result<Vec<LogEntry>> {
        self.commits()
            .known()
            .iter()
            .map(|oid| Ok((oid.clone(), self.database().get_commit(oid)?)))
            .collect()
    }

    /// Ids of the commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .full_log()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect())
    }

    pub fn print_log(&self, entries: &[LogEntry]) -> anyhow::Result<()> {
        for (oid, commit) in entries {
            self.show_commit(oid, commit)?;
        }

        Ok(())
    }

    pub fn print_found(&self, oids: &[ObjectId]) -> anyhow::Result<()> {
        if oids.is_empty() {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }
        for oid in oids {
            writeln!(self.writer(), "{oid}")?;
        }

        Ok(())
    }

    fn show_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;
        // merged-in branch first, then the branch merged into
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                merge_parent.to_short_oid(),
                parent.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
