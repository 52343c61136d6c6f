//! Data structures and algorithms
//!
//! - `branch`: Branch names and the split-point index
//! - `checkout`: Working tree migrations and the untracked-file guard
//! - `core`: Shared utilities (configuration, pager wrapper)
//! - `log`: Commit history traversal
//! - `merge`: Ancestor search and three-way resolution
//! - `objects`: Object types (blob, commit)
//! - `state`: Persisted repository state
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod state;
pub mod status;
