//! Commit history for commithub
//!
//! This crate provides:
//! - Staging index (files queued for the next commit)
//! - Commit records and the parent-linked commit chain
//! - History walker from HEAD to the root
//! - Line diff and per-commit diff engine

pub mod chain;
pub mod commit;
pub mod diff;
pub mod history;
pub mod line_diff;
pub mod repo;
pub mod staging;

// Re-exports
pub use chain::CommitChain;
pub use commit::Commit;
pub use diff::{CommitDiff, DiffEngine, FileDiff, FileStatus};
pub use history::{History, LogEntry};
pub use line_diff::{diff_lines, Segment, SegmentKind};
pub use repo::Repository;
pub use staging::StagingIndex;

pub use commithub_core::{Error, Result};
