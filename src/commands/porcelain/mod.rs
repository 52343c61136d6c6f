//! User-facing operations
//!
//! Each module extends [`Repository`](crate::areas::repository::Repository)
//! with one operation (load, mutate, persist) and, where the command line
//! needs it, a `print_*` companion rendering the result.
//!
//! ## Commands
//!
//! - `init`: Report a freshly created repository
//! - `add`: Stage a file
//! - `rm`: Unstage a file or stage its removal
//! - `commit`: Record the staged changes
//! - `status`: Branches, staged, removed, unstaged and untracked files
//! - `log`: First-parent history, every commit, or commits by message
//! - `branch`: Create or delete branches
//! - `checkout`: Switch branches or restore single files
//! - `reset`: Move head to an earlier commit
//! - `merge`: Three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
