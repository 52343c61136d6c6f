//! Commit history traversal
//!
//! Two walks are provided:
//!
//! - first-parent, from a commit back to the root (used by `log`)
//! - every reachable commit through both parent links

pub mod rev_list;
