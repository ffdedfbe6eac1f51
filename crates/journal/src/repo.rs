//! Repository handle: the state every operation runs against

use crate::chain::CommitChain;
use crate::commit::Commit;
use crate::diff::{CommitDiff, DiffEngine};
use crate::history::{History, LogEntry};
use crate::staging::StagingIndex;
use commithub_core::{Result, Sha1Hash, StagingEntry, Store};
use std::path::Path;

/// An opened repository
pub struct Repository {
    store: Store,
}

impl Repository {
    /// Create the repository layout under `root`
    pub fn init(root: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::init(root)?,
        })
    }

    /// Open the repository rooted exactly at `root`
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::open(root)?,
        })
    }

    /// Open the nearest repository at or above `start`
    pub fn discover(start: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::discover(start)?,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn staging(&self) -> StagingIndex<'_> {
        StagingIndex::new(&self.store)
    }

    pub fn chain(&self) -> CommitChain<'_> {
        CommitChain::new(&self.store)
    }

    pub fn diff_engine(&self) -> DiffEngine<'_> {
        DiffEngine::new(&self.store)
    }

    /// Stage a file from the working tree
    pub fn add(&self, file: &Path) -> Result<StagingEntry> {
        self.staging().add(file)
    }

    /// Commit the staging index
    pub fn commit(&self, message: &str) -> Result<Sha1Hash> {
        self.chain().commit(message)
    }

    pub fn head(&self) -> Result<Option<Sha1Hash>> {
        self.chain().head()
    }

    pub fn get_commit(&self, hash: &Sha1Hash) -> Result<Commit> {
        self.chain().get(hash)
    }

    /// History from HEAD, newest first
    pub fn log(&self) -> Result<History<'_>> {
        History::from_head(&self.store)
    }

    /// Collect the whole history, stopping at the first error
    pub fn log_entries(&self) -> Result<Vec<LogEntry>> {
        self.log()?.collect()
    }

    pub fn diff_commit(&self, hash: &Sha1Hash) -> Result<CommitDiff> {
        self.diff_engine().diff_commit(hash)
    }

    pub fn diff_reference(&self, reference: &str) -> Result<CommitDiff> {
        self.diff_engine().diff_reference(reference)
    }
}
