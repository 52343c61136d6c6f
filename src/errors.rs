//! Repository failure taxonomy
//!
//! Core operations return `anyhow::Result`. Failures that callers are expected to
//! react to are raised as [`RepositoryError`] values so they can be recovered with
//! `error.downcast_ref::<RepositoryError>()`; everything else (I/O, decoding) is
//! a plain `anyhow` error with context attached.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`RepositoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidState,
    UntrackedOverwrite,
    AmbiguousOrNotFound,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not a twig repository: {0}")]
    NotARepository(PathBuf),

    #[error("a twig repository already exists in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("file {0} does not exist")]
    FileNotFound(PathBuf),

    #[error("path {0:?} cannot be tracked: names must be UTF-8 without line breaks")]
    InvalidPath(PathBuf),

    #[error("file {path} does not exist in commit {commit}")]
    FileNotInCommit { path: PathBuf, commit: ObjectId },

    #[error("branch {0} does not exist")]
    BranchNotFound(String),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("a branch named {0} already exists")]
    BranchAlreadyExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("no changes added to the commit")]
    EmptyStage,

    #[error("please enter a commit message")]
    EmptyMessage,

    #[error("you have uncommitted changes")]
    UncommittedChanges,

    #[error("cannot merge a branch with itself")]
    SelfMerge,

    #[error("cannot remove the current branch {0}")]
    IsCurrentBranch(String),

    #[error("already on branch {0}")]
    AlreadyOnBranch(String),

    #[error("no reason to remove the file {0}")]
    NothingToRemove(PathBuf),

    #[error(
        "untracked working tree files would be overwritten: {}; delete them, or add and commit them first",
        display_paths(.0)
    )]
    UntrackedOverwrite(Vec<PathBuf>),

    #[error("no unique commit matches id {0}")]
    AmbiguousOrNotFound(String),
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotARepository(_)
            | RepositoryError::FileNotFound(_)
            | RepositoryError::FileNotInCommit { .. }
            | RepositoryError::BranchNotFound(_)
            | RepositoryError::ObjectNotFound(_) => ErrorKind::NotFound,
            RepositoryError::AlreadyInitialized(_) | RepositoryError::BranchAlreadyExists(_) => {
                ErrorKind::AlreadyExists
            }
            RepositoryError::InvalidBranchName(_)
            | RepositoryError::InvalidPath(_)
            | RepositoryError::EmptyStage
            | RepositoryError::EmptyMessage
            | RepositoryError::UncommittedChanges
            | RepositoryError::SelfMerge
            | RepositoryError::IsCurrentBranch(_)
            | RepositoryError::AlreadyOnBranch(_)
            | RepositoryError::NothingToRemove(_) => ErrorKind::InvalidState,
            RepositoryError::UntrackedOverwrite(_) => ErrorKind::UntrackedOverwrite,
            RepositoryError::AmbiguousOrNotFound(_) => ErrorKind::AmbiguousOrNotFound,
        }
    }

    /// Extract the repository failure carried by an `anyhow` error, if any
    pub fn find(error: &anyhow::Error) -> Option<&RepositoryError> {
        error.downcast_ref::<RepositoryError>()
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
