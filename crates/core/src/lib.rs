//! commithub core - content-addressed storage primitives
//!
//! This crate provides the storage layer:
//! - SHA-1 hashing
//! - Object storage keyed by content hash
//! - HEAD and staging index files
//! - Repository configuration

pub mod config;
pub mod entry;
pub mod error;
pub mod hash;
pub mod objects;
pub mod store;

// Re-export main types for convenience
pub use config::RepoConfig;
pub use entry::StagingEntry;
pub use error::{Error, Result};
pub use hash::{hash_bytes, hash_file, Sha1Hash};
pub use objects::ObjectStore;
pub use store::{normalize_path, Store, LEGACY_REPO_DIR, REPO_DIR};
