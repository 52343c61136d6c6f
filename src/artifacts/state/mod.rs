//! Persisted repository state
//!
//! Everything that is not an object (branches, split points, the staging area
//! and the list of known commits) is stored as one binary snapshot in
//! `.twig/state`, rewritten at the end of every mutating operation.
//!
//! ## File Format
//!
//! ```text
//! Header (8 bytes):
//!   - Signature: "TWIG" (4 bytes)
//!   - Version: 1 (4 bytes)
//!
//! Body (network byte order; str = u32 length + UTF-8 bytes; oid = 20 raw bytes):
//!   - str current-branch
//!   - u32 n-branches  { str name, u32 n, n x oid }
//!   - u32 n-splits    { str a, str b, oid }
//!   - u32 n-additions { str path, u32 len, bytes }
//!   - u32 n-removals  { str path }
//!   - u32 n-commits   { oid }
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod snapshot;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Magic signature identifying state files
pub const SIGNATURE: &str = "TWIG";

/// State file format version
pub const VERSION: u32 = 1;
