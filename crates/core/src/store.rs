//! On-disk repository state: objects, HEAD, staging index, config

use crate::config::{RepoConfig, CONFIG_FILE};
use crate::entry::StagingEntry;
use crate::error::{Error, Result};
use crate::hash::Sha1Hash;
use crate::objects::ObjectStore;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the repository root
pub const REPO_DIR: &str = ".commithub";

/// Directory name used by the original CommitHub tool; opened when present
pub const LEGACY_REPO_DIR: &str = ".CommitHub";

const HEAD_FILE: &str = "HEAD";
const INDEX_FILE: &str = "index";
const OBJECTS_DIR: &str = "objects";
const TMP_DIR: &str = "tmp";

/// Main store for commithub repository data
///
/// Manages the `.commithub/` directory structure:
/// ```text
/// .commithub/
///   config.toml
///   HEAD
///   index
///   objects/
///     <40-hex>
///   tmp/
/// ```
///
/// Every read and write of repository state goes through this type.
pub struct Store {
    /// Root of repository
    root: PathBuf,
    /// Path to .commithub directory
    repo_dir: PathBuf,
    /// Blob and commit storage
    objects: ObjectStore,
    /// Loaded config.toml
    config: RepoConfig,
}

impl Store {
    /// Initialize a new store at the given repository root
    ///
    /// Never overwrites existing state: if `HEAD` or `index` is already
    /// present the call returns [`Error::AlreadyInitialized`].
    pub fn init(repo_root: &Path) -> Result<Self> {
        use std::fs;

        let repo_dir = repo_dir_for(repo_root);

        let objects_dir = repo_dir.join(OBJECTS_DIR);
        fs::create_dir_all(&objects_dir).map_err(|e| Error::io(&objects_dir, e))?;
        let tmp_dir = repo_dir.join(TMP_DIR);
        fs::create_dir_all(&tmp_dir).map_err(|e| Error::io(&tmp_dir, e))?;

        // Missing pieces are filled in, present ones are left alone
        let mut existed = false;
        for (name, initial) in [(HEAD_FILE, &b""[..]), (INDEX_FILE, &b"[]"[..])] {
            let path = repo_dir.join(name);
            if path.exists() {
                existed = true;
            } else {
                create_new(&path, initial)?;
            }
        }

        if !repo_dir.join(CONFIG_FILE).exists() {
            RepoConfig::default().save(&repo_dir)?;
        }

        if existed {
            return Err(Error::AlreadyInitialized(repo_root.to_path_buf()));
        }

        tracing::info!(repo = %repo_root.display(), "initialized repository");

        Self::open(repo_root)
    }

    /// Open an existing store
    pub fn open(repo_root: &Path) -> Result<Self> {
        let repo_dir = repo_dir_for(repo_root);

        // Validate required layout
        if !repo_dir.join(OBJECTS_DIR).is_dir()
            || !repo_dir.join(HEAD_FILE).is_file()
            || !repo_dir.join(INDEX_FILE).is_file()
        {
            return Err(Error::NotInitialized(repo_root.to_path_buf()));
        }

        let config = RepoConfig::load(&repo_dir)?;
        let objects = ObjectStore::new(repo_dir.join(OBJECTS_DIR), repo_dir.join(TMP_DIR))
            .with_verify(config.store.verify_objects);

        Ok(Self {
            root: repo_root.to_path_buf(),
            repo_dir,
            objects,
            config,
        })
    }

    /// Open the store of the nearest enclosing repository
    pub fn discover(start: &Path) -> Result<Self> {
        let mut current = start;

        loop {
            if current.join(REPO_DIR).is_dir() || current.join(LEGACY_REPO_DIR).is_dir() {
                return Self::open(current);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Err(Error::NotInitialized(start.to_path_buf())),
            }
        }
    }

    /// Read the HEAD pointer; `None` when no commit exists yet
    pub fn read_head(&self) -> Result<Option<Sha1Hash>> {
        let path = self.repo_dir.join(HEAD_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&path, e)),
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        Sha1Hash::from_hex(content)
            .map(Some)
            .map_err(|e| Error::malformed("HEAD", e))
    }

    /// Point HEAD at a commit
    pub fn write_head(&self, hash: &Sha1Hash) -> Result<()> {
        self.write_state(HEAD_FILE, hash.to_hex().as_bytes())?;
        tracing::debug!(%hash, "updated HEAD");
        Ok(())
    }

    /// Read the staging index; a missing file is an empty index
    pub fn read_index(&self) -> Result<Vec<StagingEntry>> {
        let path = self.repo_dir.join(INDEX_FILE);
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&path, e)),
        };

        serde_json::from_slice(&content).map_err(|e| Error::malformed("index", e))
    }

    /// Replace the staging index
    pub fn write_index(&self, entries: &[StagingEntry]) -> Result<()> {
        let content = serde_json::to_vec(entries).map_err(|e| Error::malformed("index", e))?;
        self.write_state(INDEX_FILE, &content)?;
        tracing::debug!(entries = entries.len(), "wrote index");
        Ok(())
    }

    fn write_state(&self, name: &str, data: &[u8]) -> Result<()> {
        atomic_write(&self.repo_dir.join(TMP_DIR), &self.repo_dir.join(name), data)
    }

    /// Get the object store
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Get the .commithub directory path
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Repository directory under `repo_root`: `.commithub`, or `.CommitHub`
/// when only that one exists
fn repo_dir_for(repo_root: &Path) -> PathBuf {
    let dir = repo_root.join(REPO_DIR);
    let legacy = repo_root.join(LEGACY_REPO_DIR);
    if !dir.is_dir() && legacy.is_dir() {
        legacy
    } else {
        dir
    }
}

fn create_new(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(data).map_err(|e| Error::io(path, e))?;
    file.sync_all().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Atomic write helper
///
/// Writes data to a temporary file, fsyncs it, then renames it to the target path.
pub fn atomic_write(tmp_dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    use std::fs;

    fs::create_dir_all(tmp_dir).map_err(|e| Error::io(tmp_dir, e))?;

    let temp_path = tmp_dir.join(uuid::Uuid::new_v4().to_string());

    if let Err(e) = write_and_rename(&temp_path, target, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    // Fsync parent directory for durability
    if let Some(parent) = target.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}

fn write_and_rename(temp_path: &Path, target: &Path, data: &[u8]) -> Result<()> {
    use std::fs;

    let mut temp_file = fs::File::create(temp_path).map_err(|e| Error::io(temp_path, e))?;
    temp_file
        .write_all(data)
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| Error::io(temp_path, e))?;
    drop(temp_file);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Rename to target (atomic on POSIX systems)
    fs::rename(temp_path, target).map_err(|e| Error::io(target, e))
}

/// Normalize a path for storage
///
/// - Removes `./` prefixes
/// - Converts backslashes to `/`
///
/// The result is what diff lookups compare by equality.
pub fn normalize_path(path: &Path) -> String {
    let path_str = path.to_string_lossy().replace('\\', "/");

    let mut normalized = path_str.as_str();
    while let Some(stripped) = normalized.strip_prefix("./") {
        normalized = stripped;
    }

    normalized.to_string()
}
