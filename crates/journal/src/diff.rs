//! Per-file change report for a commit against its parent

use crate::chain::CommitChain;
use crate::commit::Commit;
use crate::line_diff::{diff_lines, Segment, SegmentKind};
use commithub_core::{Error, Result, Sha1Hash, Store};

/// How a file in a commit relates to its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The commit has no parent, nothing to compare against
    FirstCommit,
    /// The parent does not contain this path
    NewFile,
    /// Line diff from the parent's version to this one
    Changed(Vec<Segment>),
}

/// One file entry of a commit with its resolved content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub hash: Sha1Hash,
    pub content: Vec<u8>,
    pub status: FileStatus,
}

impl FileDiff {
    /// Content as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    pub fn added_lines(&self) -> usize {
        self.count_lines(SegmentKind::Added)
    }

    pub fn removed_lines(&self) -> usize {
        self.count_lines(SegmentKind::Removed)
    }

    /// True when compared against the parent and something differs
    pub fn has_changes(&self) -> bool {
        self.added_lines() + self.removed_lines() > 0
    }

    fn count_lines(&self, kind: SegmentKind) -> usize {
        match &self.status {
            FileStatus::Changed(segments) => segments
                .iter()
                .filter(|s| s.kind == kind)
                .map(Segment::line_count)
                .sum(),
            _ => 0,
        }
    }
}

/// Diff of every file entry in one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDiff {
    pub hash: Sha1Hash,
    pub commit: Commit,
    pub files: Vec<FileDiff>,
}

pub struct DiffEngine<'a> {
    store: &'a Store,
    chain: CommitChain<'a>,
}

impl<'a> DiffEngine<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            chain: CommitChain::new(store),
        }
    }

    /// Diff a commit given as a full hash, unique prefix or `HEAD`
    pub fn diff_reference(&self, reference: &str) -> Result<CommitDiff> {
        let hash = self.chain.resolve(reference)?;
        self.diff_commit(&hash)
    }

    /// Diff a commit against its parent
    ///
    /// Unknown `hash` is [`Error::CommitNotFound`]. A blob or parent commit
    /// the commit refers to but the store lacks is [`Error::Integrity`].
    pub fn diff_commit(&self, hash: &Sha1Hash) -> Result<CommitDiff> {
        let commit = self.chain.get(hash)?;

        let parent = match commit.parent {
            Some(parent_hash) => Some(self.chain.get(&parent_hash).map_err(|e| match e {
                Error::CommitNotFound(_) => Error::Integrity(format!(
                    "commit {} references missing parent {}",
                    hash, parent_hash
                )),
                other => other,
            })?),
            None => None,
        };

        let mut files = Vec::with_capacity(commit.files.len());
        for entry in &commit.files {
            let content = self.blob(&entry.hash, hash)?;

            let status = match &parent {
                None => FileStatus::FirstCommit,
                Some(parent) => match parent.file(&entry.path) {
                    None => FileStatus::NewFile,
                    Some(previous) => {
                        let old = self.blob(&previous.hash, hash)?;
                        FileStatus::Changed(diff_lines(
                            &String::from_utf8_lossy(&old),
                            &String::from_utf8_lossy(&content),
                        ))
                    }
                },
            };

            files.push(FileDiff {
                path: entry.path.clone(),
                hash: entry.hash,
                content,
                status,
            });
        }

        tracing::debug!(%hash, files = files.len(), "computed commit diff");

        Ok(CommitDiff {
            hash: *hash,
            commit,
            files,
        })
    }

    fn blob(&self, hash: &Sha1Hash, commit: &Sha1Hash) -> Result<Vec<u8>> {
        self.store.objects().get(hash).map_err(|e| match e {
            Error::NotFound(_) => Error::Integrity(format!(
                "commit {} references missing object {}",
                commit, hash
            )),
            other => other,
        })
    }
}
