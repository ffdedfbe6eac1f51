//! Staging index: files queued for the next commit

use commithub_core::{normalize_path, Error, Result, Sha1Hash, StagingEntry, Store};
use std::io;
use std::path::Path;

/// Ordered list of staged entries, persisted in `.commithub/index`
///
/// Each `add` appends. Staging the same path twice keeps both entries.
pub struct StagingIndex<'a> {
    store: &'a Store,
}

impl<'a> StagingIndex<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Append an entry. The blob is assumed to be stored already.
    pub fn stage(&self, path: impl Into<String>, hash: Sha1Hash) -> Result<()> {
        let mut entries = self.store.read_index()?;
        entries.push(StagingEntry::new(path, hash));
        self.store.write_index(&entries)
    }

    /// All staged entries in staging order
    pub fn read_all(&self) -> Result<Vec<StagingEntry>> {
        self.store.read_index()
    }

    /// Reset to an empty index
    pub fn clear(&self) -> Result<()> {
        self.store.write_index(&[])
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read_all()?.is_empty())
    }

    /// Read `file`, store its bytes as a blob and stage it
    ///
    /// The entry's path is relative to the repository root whatever the
    /// current directory, so a file keeps one identity across commits.
    pub fn add(&self, file: &Path) -> Result<StagingEntry> {
        let data = std::fs::read(file).map_err(|source| Error::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        let path = self.repo_relative(file)?;

        let hash = self.store.objects().put(&data)?;
        let entry = StagingEntry::new(path, hash);
        self.stage(entry.path.clone(), hash)?;

        tracing::debug!(path = %entry.path, %hash, "staged file");
        Ok(entry)
    }

    /// `/`-separated path of `file` below the repository root
    ///
    /// Only the parent directory is canonicalized so a symlinked file keeps
    /// its own name.
    fn repo_relative(&self, file: &Path) -> Result<String> {
        let name = file.file_name().ok_or_else(|| Error::FileRead {
            path: file.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a file path"),
        })?;
        let parent = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let parent = parent.canonicalize().map_err(|source| Error::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        let root = self
            .store
            .root()
            .canonicalize()
            .map_err(|e| Error::io(self.store.root(), e))?;

        let absolute = parent.join(name);
        let relative = absolute
            .strip_prefix(&root)
            .map_err(|_| Error::OutsideRepository(file.to_path_buf()))?;

        let repo_dir_name = self.store.repo_dir().file_name();
        if relative.components().next().map(|c| c.as_os_str()) == repo_dir_name {
            return Err(Error::OutsideRepository(file.to_path_buf()));
        }

        Ok(normalize_path(relative))
    }
}
