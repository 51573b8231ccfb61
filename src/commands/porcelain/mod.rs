//! Porcelain commands (user-facing version control workflows)
//!
//! - `init`: create the storage directory
//! - `add`: stage files for the next commit
//! - `commit`: snapshot the working directory
//! - `status`: classify working files against the index
//! - `diff`: name the staged files whose working copy changed
//! - `log` / `show`: print history
//! - `checkout`: restore the working directory to a past commit

pub mod add;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;
