//! Commit chain: HEAD plus immutable, parent-linked commit objects

use crate::commit::Commit;
use crate::staging::StagingIndex;
use commithub_core::hash::is_hex;
use commithub_core::{Error, Result, Sha1Hash, Store};

/// Shortest abbreviated hash accepted by [`CommitChain::resolve`]
pub const MIN_PREFIX_LEN: usize = 4;

pub struct CommitChain<'a> {
    store: &'a Store,
}

impl<'a> CommitChain<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Current HEAD, `None` before the first commit
    pub fn head(&self) -> Result<Option<Sha1Hash>> {
        self.store.read_head()
    }

    /// Turn the staging index into a commit on top of HEAD
    pub fn commit(&self, message: &str) -> Result<Sha1Hash> {
        let staging = StagingIndex::new(self.store);

        // Snapshot first: the index is cleared only after HEAD moves
        let files = staging.read_all()?;
        let parent = self.head()?;

        let commit = Commit::new(message, files, parent);
        let bytes = commit.to_bytes()?;
        let hash = self.store.objects().put(&bytes)?;

        self.store.write_head(&hash)?;
        staging.clear()?;

        tracing::info!(
            %hash,
            files = commit.files.len(),
            parent = ?parent.map(|p| p.short()),
            "created commit"
        );
        Ok(hash)
    }

    /// Load a commit by hash
    pub fn get(&self, hash: &Sha1Hash) -> Result<Commit> {
        let bytes = match self.store.objects().get(hash) {
            Ok(bytes) => bytes,
            Err(Error::NotFound(_)) => return Err(Error::CommitNotFound(hash.to_hex())),
            Err(e) => return Err(e),
        };

        Commit::from_bytes(hash, &bytes)
    }

    /// Resolve a user-supplied reference to a stored object hash
    ///
    /// Accepts `HEAD`, a full hash or a unique hex prefix of at least
    /// [`MIN_PREFIX_LEN`] characters.
    pub fn resolve(&self, reference: &str) -> Result<Sha1Hash> {
        let reference = reference.trim();

        if reference.eq_ignore_ascii_case("HEAD") {
            return self
                .head()?
                .ok_or_else(|| Error::CommitNotFound(reference.to_string()));
        }

        if let Ok(hash) = Sha1Hash::from_hex(reference) {
            if self.store.objects().contains(&hash) {
                return Ok(hash);
            }
            return Err(Error::CommitNotFound(reference.to_string()));
        }

        if reference.len() < MIN_PREFIX_LEN || !is_hex(reference) {
            return Err(Error::CommitNotFound(reference.to_string()));
        }

        let matches = self.store.objects().find_prefix(reference)?;
        match matches.as_slice() {
            [] => Err(Error::CommitNotFound(reference.to_string())),
            [hash] => Ok(*hash),
            _ => Err(Error::AmbiguousPrefix {
                prefix: reference.to_string(),
                matches: matches.len(),
            }),
        }
    }
}
