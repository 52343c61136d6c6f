use crate::areas::commit_graph::CommitGraph;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::objects::commit::{Commit, FileMap};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::snapshot::{RepositoryState, StateFile};
use crate::errors::RepositoryError;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local};
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const REPOSITORY_DIR: &str = ".twig";
const OBJECTS_DIR: &str = "objects";
const STATE_FILE: &str = "state";

/// One repository, opened for a single operation
///
/// The persisted state is loaded up front; mutating operations change it in
/// memory and call `persist` as their last step.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    database: Database,
    workspace: Workspace,
    state_file: StateFile,
    state: RepositoryState,
}

impl Repository {
    /// Create `.twig/` under `path` along with the root commit
    pub fn init(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }
        let path = path.canonicalize()?;

        let twig_path = path.join(REPOSITORY_DIR);
        if twig_path.exists() {
            return Err(RepositoryError::AlreadyInitialized(path).into());
        }

        let database = Database::new(twig_path.join(OBJECTS_DIR).into_boxed_path());
        std::fs::create_dir_all(database.objects_path())
            .context("Failed to create .twig/objects directory")?;

        let root = database.put_commit(&Commit::root())?;
        let repository = Repository {
            workspace: Workspace::new(path.clone().into_boxed_path()),
            state_file: StateFile::new(twig_path.join(STATE_FILE).into_boxed_path()),
            state: RepositoryState::new(root.clone()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            database,
        };
        repository.persist()?;

        tracing::debug!(path = %repository.path.display(), root = %root, "initialized repository");
        Ok(repository)
    }

    /// Load the repository rooted at `path`
    pub fn open(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let twig_path = path.join(REPOSITORY_DIR);
        let state_file = StateFile::new(twig_path.join(STATE_FILE).into_boxed_path());
        if !state_file.exists() {
            return Err(RepositoryError::NotARepository(path.to_path_buf()).into());
        }
        let path = path.canonicalize()?;

        let state = state_file.load()?;

        Ok(Repository {
            workspace: Workspace::new(path.clone().into_boxed_path()),
            database: Database::new(twig_path.join(OBJECTS_DIR).into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            state_file,
            state,
        })
    }

    pub fn persist(&self) -> anyhow::Result<()> {
        self.state_file.store(&self.state)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.state.refs
    }

    pub fn index(&self) -> &Index {
        &self.state.index
    }

    pub fn commits(&self) -> &CommitGraph {
        &self.state.commits
    }

    pub(crate) fn state_mut(&mut self) -> &mut RepositoryState {
        &mut self.state
    }

    /// Object store and mutable state at once, for operations writing both
    pub(crate) fn database_and_state_mut(&mut self) -> (&Database, &mut RepositoryState) {
        (&self.database, &mut self.state)
    }

    pub fn head(&self) -> anyhow::Result<&ObjectId> {
        self.state.refs.head()
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.get_commit(self.head()?)
    }

    pub fn head_files(&self) -> anyhow::Result<FileMap> {
        Ok(self.head_commit()?.files().clone())
    }

    /// Timestamp for a new commit
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.config
            .commit_date
            .unwrap_or_else(|| Local::now().fixed_offset())
    }
}
