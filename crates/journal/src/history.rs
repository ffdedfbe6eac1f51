//! Lazy walk of the commit chain from HEAD to the root

use crate::chain::CommitChain;
use crate::commit::Commit;
use commithub_core::{Result, Sha1Hash, Store};
use std::collections::HashSet;

/// A commit together with its address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: Sha1Hash,
    pub commit: Commit,
}

/// Iterator over commits, most recent first
///
/// A failed lookup is yielded once, then the walk ends. A hash seen twice
/// also ends the walk.
pub struct History<'a> {
    chain: CommitChain<'a>,
    next: Option<Sha1Hash>,
    visited: HashSet<Sha1Hash>,
}

impl<'a> History<'a> {
    /// Walk from the current HEAD
    pub fn from_head(store: &'a Store) -> Result<Self> {
        let head = store.read_head()?;
        Ok(Self::starting_at(store, head))
    }

    /// Walk from an arbitrary commit
    fn starting_at(store: &'a Store, start: Option<Sha1Hash>) -> Self {
        Self {
            chain: CommitChain::new(store),
            next: start,
            visited: HashSet::new(),
        }
    }
}

impl Iterator for History<'_> {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let hash = self.next.take()?;

        if !self.visited.insert(hash) {
            tracing::warn!(%hash, "commit chain revisits a commit, stopping history walk");
            return None;
        }

        match self.chain.get(&hash) {
            Ok(commit) => {
                self.next = commit.parent;
                Some(Ok(LogEntry { hash, commit }))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commithub_core::{hash_bytes, Error};

    #[test]
    fn test_empty_history() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = Store::init(temp_dir.path())?;

        assert_eq!(History::from_head(&store)?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_history_order() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = Store::init(temp_dir.path())?;
        let chain = CommitChain::new(&store);

        let hashes: Vec<Sha1Hash> = (0..3)
            .map(|i| chain.commit(&format!("commit {}", i)))
            .collect::<Result<_>>()?;

        let entries: Vec<LogEntry> = History::from_head(&store)?.collect::<Result<_>>()?;
        let walked: Vec<Sha1Hash> = entries.iter().map(|e| e.hash).collect();

        let mut expected = hashes.clone();
        expected.reverse();
        assert_eq!(walked, expected);
        assert_eq!(entries[2].commit.parent, None);
        Ok(())
    }

    #[test]
    fn test_missing_parent_stops_after_error() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = Store::init(temp_dir.path())?;

        let dangling = hash_bytes(b"missing parent");
        let commit = Commit::new("orphan", vec![], Some(dangling));
        let hash = store.objects().put(&commit.to_bytes()?)?;
        store.write_head(&hash)?;

        let mut history = History::from_head(&store)?;
        assert_eq!(history.next().transpose()?.map(|e| e.hash), Some(hash));
        assert!(matches!(history.next(), Some(Err(Error::CommitNotFound(_)))));
        assert!(history.next().is_none());
        Ok(())
    }

    #[test]
    fn test_cycle_guard() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = Store::init(temp_dir.path())?;

        // Content addressing makes a real cycle impossible, so disable
        // verification and hand-edit an object to point at itself
        let commit = Commit::new("loop", vec![], None);
        let hash = store.objects().put(&commit.to_bytes()?)?;
        let looped = Commit {
            parent: Some(hash),
            ..commit
        };
        std::fs::write(store.objects().object_path(&hash), looped.to_bytes()?)?;
        std::fs::write(
            store.repo_dir().join("config.toml"),
            "[store]\nverify_objects = false\n",
        )?;
        store.write_head(&hash)?;

        let store = Store::open(temp_dir.path())?;
        let entries: Vec<_> = History::from_head(&store)?.collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_ok());
        Ok(())
    }
}
