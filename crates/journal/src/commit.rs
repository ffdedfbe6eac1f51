//! Commit records

use chrono::{DateTime, SecondsFormat, Utc};
use commithub_core::{Error, Result, Sha1Hash, StagingEntry};
use serde::{Deserialize, Deserializer, Serialize};

/// A commit snapshots the staging index and links to its parent
///
/// On disk a commit is compact JSON with the keys `timeStamp`, `message`,
/// `files` and `parent`, in that order. The commit's address is the hash of
/// exactly those bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// RFC 3339 UTC timestamp
    #[serde(rename = "timeStamp")]
    pub timestamp: String,
    /// Commit message
    pub message: String,
    /// Staging index at commit time, in staging order
    pub files: Vec<StagingEntry>,
    /// Parent commit, `None` for the root
    #[serde(deserialize_with = "deserialize_parent")]
    pub parent: Option<Sha1Hash>,
}

/// Accepts `null`, `""` (written by older tools when HEAD was empty) or a hash
fn deserialize_parent<'de, D>(deserializer: D) -> std::result::Result<Option<Sha1Hash>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(hex) => Sha1Hash::from_hex(hex)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl Commit {
    /// Create a new commit stamped with the current time
    pub fn new(message: impl Into<String>, files: Vec<StagingEntry>, parent: Option<Sha1Hash>) -> Self {
        Self {
            timestamp: current_timestamp(),
            message: message.into(),
            files,
            parent,
        }
    }

    /// Serialize commit to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::malformed("commit", e))
    }

    /// Deserialize commit from bytes
    ///
    /// Bytes that are not a JSON object are not a commit at all (for example a
    /// blob) and yield [`Error::CommitNotFound`]. A JSON object that fails
    /// validation, or object text that fails to parse (a truncated commit),
    /// yields [`Error::MalformedData`].
    pub fn from_bytes(hash: &Sha1Hash, bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(e) if looks_like_object(bytes) => {
                return Err(Error::malformed(format!("commit {}", hash), e))
            }
            Err(_) => return Err(Error::CommitNotFound(hash.to_hex())),
        };
        if !value.is_object() {
            return Err(Error::CommitNotFound(hash.to_hex()));
        }

        let commit: Commit = serde_json::from_value(value)
            .map_err(|e| Error::malformed(format!("commit {}", hash), e))?;

        if commit.timestamp_utc().is_none() {
            return Err(Error::malformed(
                format!("commit {}", hash),
                format!("invalid timestamp '{}'", commit.timestamp),
            ));
        }

        Ok(commit)
    }

    /// Parsed timestamp
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// First entry staged under `path`
    pub fn file(&self, path: &str) -> Option<&StagingEntry> {
        self.files.iter().find(|entry| entry.path == path)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

fn looks_like_object(bytes: &[u8]) -> bool {
    bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
