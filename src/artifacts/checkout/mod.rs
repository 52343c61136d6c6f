//! Applying a commit's file tree to the working directory
//!
//! Shared by branch checkout, reset and merge:
//!
//! - `conflict`: refuses to clobber untracked files
//! - `migration`: plans the writes and deletions, loading every blob up front

pub mod conflict;
pub mod migration;
