use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".twig", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file of the working tree, relative to its root, in path order
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }

    /// Repository-relative form of a user-supplied path
    ///
    /// Paths escaping the working tree are reported as missing; names that a
    /// commit cannot record (non UTF-8, containing a line break) are rejected.
    pub fn relative_path(&self, file_path: &Path) -> anyhow::Result<PathBuf> {
        let stripped = file_path.strip_prefix(&self.path).unwrap_or(file_path);

        let mut relative = PathBuf::new();
        for component in stripped.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) => relative.push(name),
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(RepositoryError::FileNotFound(file_path.to_path_buf()).into());
                }
            }
        }

        match relative.to_str() {
            Some(name) if !name.contains(['\n', '\r']) => Ok(relative),
            _ => Err(RepositoryError::InvalidPath(relative).into()),
        }
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);
        if !full_path.is_file() {
            return Err(RepositoryError::FileNotFound(file_path.to_path_buf()).into());
        }

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Write `data` to `file_path`, creating missing parent directories
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }
        if path.is_dir() {
            std::fs::remove_dir_all(&path).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete `file_path` if present, then prune parent directories left empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
            let dir_path = self.path.join(dir);
            let is_empty = std::fs::read_dir(&dir_path)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Failed to remove directory: {:?}", dir))?;
            parent = dir.parent();
        }

        Ok(())
    }

    // Deletions run first so a file can replace a directory it used to live in.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for (file_path, _) in migration.actions(ActionType::Delete) {
            self.remove_file(file_path)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (file_path, data) in migration.actions(action) {
                let data = data
                    .as_ref()
                    .with_context(|| format!("Missing content for file: {:?}", file_path))?;
                self.write_file(file_path, data)?;
            }
        }

        tracing::debug!(
            added = migration.actions(ActionType::Add).len(),
            modified = migration.actions(ActionType::Modify).len(),
            deleted = migration.actions(ActionType::Delete).len(),
            "applied migration"
        );

        Ok(())
    }
}
