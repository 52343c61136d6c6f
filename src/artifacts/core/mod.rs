//! Shared utilities
//!
//! - `config`: Settings read from the environment
//! - `pager`: `Write` adapter for the minus pager

pub mod config;
pub mod pager;
