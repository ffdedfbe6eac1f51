//! Content-addressed object storage
//!
//! Blobs and commits share one flat namespace: `objects/<40-hex>`, raw bytes,
//! no header. An object's name is the SHA-1 of its contents.

use crate::error::{Error, Result};
use crate::hash::{hash_bytes, is_hex, Sha1Hash};
use crate::store::atomic_write;
use std::path::PathBuf;

/// Object storage rooted at `.commithub/objects/`
pub struct ObjectStore {
    /// Directory holding one file per object
    dir: PathBuf,
    /// Temp directory for atomic writes
    tmp_dir: PathBuf,
    /// Re-hash on read
    verify: bool,
}

impl ObjectStore {
    /// Create a new object store
    pub fn new(dir: PathBuf, tmp_dir: PathBuf) -> Self {
        Self {
            dir,
            tmp_dir,
            verify: true,
        }
    }

    /// Enable or disable hash verification on read
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Store content under its hash and return the hash
    pub fn put(&self, data: &[u8]) -> Result<Sha1Hash> {
        let hash = hash_bytes(data);
        let path = self.object_path(&hash);

        // Already stored, idempotent
        if path.exists() {
            tracing::trace!(%hash, "object already present");
            return Ok(hash);
        }

        atomic_write(&self.tmp_dir, &path, data)?;
        tracing::debug!(%hash, bytes = data.len(), "wrote object");

        Ok(hash)
    }

    /// Read an object's bytes
    pub fn get(&self, hash: &Sha1Hash) -> Result<Vec<u8>> {
        let path = self.object_path(hash);
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(*hash));
            }
            Err(e) => return Err(Error::io(&path, e)),
        };

        if self.verify {
            let actual = hash_bytes(&data);
            if actual != *hash {
                return Err(Error::Integrity(format!(
                    "object {} hashes to {}",
                    hash, actual
                )));
            }
        }

        Ok(data)
    }

    /// Check if an object exists
    pub fn contains(&self, hash: &Sha1Hash) -> bool {
        self.object_path(hash).is_file()
    }

    /// Get the filesystem path for an object
    pub fn object_path(&self, hash: &Sha1Hash) -> PathBuf {
        self.dir.join(hash.to_hex())
    }

    /// All stored objects whose name starts with `prefix` (case-insensitive)
    pub fn find_prefix(&self, prefix: &str) -> Result<Vec<Sha1Hash>> {
        if !is_hex(prefix) {
            return Ok(Vec::new());
        }
        let prefix = prefix.to_ascii_lowercase();

        let mut matches: Vec<Sha1Hash> = self
            .names()?
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .filter_map(|name| Sha1Hash::from_hex(&name).ok())
            .collect();
        matches.sort();

        Ok(matches)
    }

    /// Number of stored objects
    pub fn count(&self) -> Result<usize> {
        Ok(self
            .names()?
            .iter()
            .filter(|name| Sha1Hash::from_hex(name).is_ok())
            .count())
    }

    fn names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn object_store(root: &Path) -> ObjectStore {
        let dir = root.join("objects");
        std::fs::create_dir_all(&dir).unwrap();
        ObjectStore::new(dir, root.join("tmp"))
    }

    #[test]
    fn test_put_get_roundtrip() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        let data = b"hello world\n";
        let hash = objects.put(data)?;

        assert_eq!(hash, hash_bytes(data));
        assert_eq!(objects.get(&hash)?, data);
        Ok(())
    }

    #[test]
    fn test_put_binary_and_empty() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        for data in [&b""[..], &b"\0\x01\xff\xfe"[..]] {
            let hash = objects.put(data)?;
            assert_eq!(objects.get(&hash)?, data);
        }
        Ok(())
    }

    #[test]
    fn test_put_is_idempotent() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        let hash1 = objects.put(b"same")?;
        let hash2 = objects.put(b"same")?;

        assert_eq!(hash1, hash2);
        assert_eq!(objects.count()?, 1);
        Ok(())
    }

    #[test]
    fn test_object_named_by_hex() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        let hash = objects.put(b"named")?;
        let path = objects.object_path(&hash);

        assert_eq!(path, temp_dir.path().join("objects").join(hash.to_hex()));
        assert_eq!(std::fs::read(path)?, b"named");
        Ok(())
    }

    #[test]
    fn test_get_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let objects = object_store(temp_dir.path());

        let hash = hash_bytes(b"never stored");
        assert!(!objects.contains(&hash));
        assert!(matches!(objects.get(&hash), Err(Error::NotFound(h)) if h == hash));
    }

    #[test]
    fn test_get_detects_corruption() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        let hash = objects.put(b"original")?;
        std::fs::write(objects.object_path(&hash), b"tampered")?;

        assert!(matches!(objects.get(&hash), Err(Error::Integrity(_))));
        Ok(())
    }

    #[test]
    fn test_get_without_verification() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path()).with_verify(false);

        let hash = objects.put(b"original")?;
        std::fs::write(objects.object_path(&hash), b"tampered")?;

        assert_eq!(objects.get(&hash)?, b"tampered");
        Ok(())
    }

    #[test]
    fn test_find_prefix() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let objects = object_store(temp_dir.path());

        let hash = objects.put(b"prefix me")?;
        objects.put(b"something else")?;

        let hex = hash.to_hex();
        assert_eq!(objects.find_prefix(&hex[..6])?, vec![hash]);
        assert_eq!(objects.find_prefix(&hex[..6].to_uppercase())?, vec![hash]);
        assert_eq!(objects.find_prefix(&hex)?, vec![hash]);
        assert!(objects.find_prefix("not-hex")?.is_empty());
        Ok(())
    }
}
