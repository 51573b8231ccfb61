//! Error types for repository operations.
//!
//! [`KitError`] is the root error carried inside the `anyhow::Error` returned by
//! the areas and commands. Callers that need to branch on a failure mode (tests,
//! the checkout guard, the log walker) use `downcast_ref::<KitError>()` instead of
//! matching on messages.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitError {
    /// An object, commit or file was not found.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Stored bytes failed to decompress or did not parse against their format.
    #[error("corrupt {subject}: {reason}")]
    Corrupt { subject: String, reason: String },

    /// Malformed CLI usage or object reference.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A filesystem operation failed.
    #[error("I/O failure at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parent chain references a commit that cannot be loaded.
    #[error("broken history: commit {missing} (parent of {child}) cannot be loaded")]
    BrokenChain { child: String, missing: String },

    /// Checkout refused because local content would be lost.
    #[error(
        "your local changes to the following files would be overwritten by checkout:\n{}\nplease commit them or pass --force",
        format_paths(paths)
    )]
    DirtyWorkingTree { paths: Vec<PathBuf> },

    /// Another process holds the repository lock.
    #[error("repository is locked by another process ({}); try again later", path.display())]
    LockHeld { path: PathBuf },

    /// Some items of a batch operation failed; the others were applied.
    #[error("{operation} failed for {} path(s):\n{}", failures.len(), format_failures(failures))]
    PartialFailure {
        operation: &'static str,
        failures: Vec<(PathBuf, String)>,
    },

    /// No repository storage directory under the working directory.
    #[error("not a kit repository: {}", path.display())]
    NotARepository { path: PathBuf },
}

impl KitError {
    pub fn not_found(message: impl Into<String>) -> Self {
        KitError::NotFound {
            message: message.into(),
        }
    }

    pub fn corrupt(oid: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        KitError::Corrupt {
            subject: format!("object {}", oid),
            reason: reason.into(),
        }
    }

    /// A repository file other than an object (index, HEAD) failed to parse.
    pub fn corrupt_file(path: impl AsRef<std::path::Path>, reason: impl Into<String>) -> Self {
        KitError::Corrupt {
            subject: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        KitError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KitError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Look up the [`KitError`] at the root of an `anyhow` chain.
pub fn kit_error(error: &anyhow::Error) -> Option<&KitError> {
    error.chain().find_map(|cause| cause.downcast_ref::<KitError>())
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("\t{}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_failures(failures: &[(PathBuf, String)]) -> String {
    failures
        .iter()
        .map(|(path, reason)| format!("\t{}: {}", path.display(), reason))
        .collect::<Vec<_>>()
        .join("\n")
}
