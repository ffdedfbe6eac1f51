use crate::hash::Sha1Hash;
use std::path::PathBuf;

/// All errors produced by the commithub storage and history layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("not a commithub repository: {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is outside the repository", .0.display())]
    OutsideRepository(PathBuf),

    #[error("object not found: {0}")]
    NotFound(Sha1Hash),

    #[error("commit not found: {0}")]
    CommitNotFound(String),

    #[error("ambiguous commit prefix '{prefix}': matches {matches} objects")]
    AmbiguousPrefix { prefix: String, matches: usize },

    #[error("malformed {what}: {reason}")]
    MalformedData { what: String, reason: String },

    #[error("data integrity error: {0}")]
    Integrity(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedData {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.into().display(), err),
        ))
    }

    /// Lookup failures caused by the caller's input rather than corruption
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::CommitNotFound(_))
    }

    /// Damage to stored state
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_) | Self::MalformedData { .. })
    }
}
