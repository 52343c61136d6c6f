//! Core repository components
//!
//! - `commit_graph`: Known commits, history traversal and short id lookup
//! - `database`: Content-addressed object store for blobs and commits
//! - `index`: Staging area of pending additions and removals
//! - `refs`: Branch lineages, the current branch and split points
//! - `repository`: Owns everything for one operation
//! - `workspace`: Working directory file system operations

pub mod commit_graph;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
