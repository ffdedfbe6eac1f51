//! Staged file record shared by the index file and commit objects

use crate::hash::Sha1Hash;
use serde::{Deserialize, Serialize};

/// One `add`: the path as it was staged and the blob holding its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingEntry {
    pub path: String,
    pub hash: Sha1Hash,
}

impl StagingEntry {
    pub fn new(path: impl Into<String>, hash: Sha1Hash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }
}
