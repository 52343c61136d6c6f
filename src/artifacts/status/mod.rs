//! Working tree status inspection
//!
//! Compares the working directory against the head commit and the staging
//! area.
//!
//! ## Components
//!
//! - `file_change`: Kinds of unstaged modification
//! - `inspector`: Compares one file on disk with an expected blob
//! - `status_info`: Status sections (staged, removed, unstaged changes, untracked)

pub mod file_change;
pub mod inspector;
pub mod status_info;
