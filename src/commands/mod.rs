//! Command implementations
//!
//! Only porcelain commands exist: each one is a complete user-level operation
//! on a [`Repository`](crate::areas::repository::Repository).

pub mod porcelain;
