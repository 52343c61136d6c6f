//! twig: a small local version-control engine
//!
//! A content-addressed object store, a commit graph, a staging area, branch
//! lineages and a three-way merge engine, driven through [`areas::repository::Repository`].

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
