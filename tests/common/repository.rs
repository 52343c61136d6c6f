use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::redirect_temp_dir;
use assert_fs::TempDir;
use chrono::DateTime;
use rstest::fixture;
use std::path::Path;
use twig::areas::repository::Repository;
use twig::artifacts::core::config::Config;
use twig::artifacts::objects::object_id::ObjectId;
use twig::errors::{ErrorKind, RepositoryError};

pub const COMMIT_DATE: &str = "2024-01-01 12:00:00 +0000";

pub fn test_config() -> Config {
    Config {
        commit_date: Some(
            DateTime::parse_from_str(COMMIT_DATE, "%Y-%m-%d %H:%M:%S %z")
                .expect("Invalid test commit date"),
        ),
        no_pager: true,
    }
}

#[fixture]
pub fn workspace_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A freshly initialized repository together with its directory
#[fixture]
pub fn repository(workspace_dir: TempDir) -> (TempDir, Repository) {
    let repository = Repository::init(workspace_dir.path(), Box::new(std::io::sink()), test_config())
        .expect("Failed to initialize repository");

    (workspace_dir, repository)
}

pub fn reopen(dir: &Path) -> Repository {
    Repository::open(dir, Box::new(std::io::sink()), test_config())
        .expect("Failed to open repository")
}

pub fn write(dir: &Path, file: &str, content: &str) {
    write_file(FileSpec::new(dir.join(file), content.to_string()));
}

pub fn read(dir: &Path, file: &str) -> String {
    read_file(&dir.join(file))
}

/// Write, stage and commit a single file
pub fn commit_file(
    repository: &mut Repository,
    dir: &Path,
    file: &str,
    content: &str,
    message: &str,
) -> ObjectId {
    write(dir, file, content);
    repository.add(Path::new(file)).expect("Failed to stage file");
    repository.commit(message).expect("Failed to commit")
}

pub fn error_kind<T>(result: anyhow::Result<T>) -> Option<ErrorKind> {
    match result {
        Ok(_) => panic!("operation should fail"),
        Err(error) => RepositoryError::find(&error).map(RepositoryError::kind),
    }
}
