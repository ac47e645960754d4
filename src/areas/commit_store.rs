//! Commit store
//!
//! Each commit record is written to `commits/<commit-hash>` as zlib-compressed
//! JSON. Records are immutable: persisting an existing hash is a no-op.
//! Commits reference each other only by hash, so the two overlapping parent
//! chains never have to be serialized as a live object graph.

use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::commit::{Commit, NewCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoContext, VcError, VcResult};
use bytes::Bytes;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CommitStore {
    path: Box<Path>,
}

impl CommitStore {
    pub fn new(path: Box<Path>) -> Self {
        CommitStore { path }
    }

    pub fn commits_path(&self) -> &Path {
        &self.path
    }

    /// Seal a draft into a commit record
    ///
    /// Fails with [`VcError::EmptyMessage`] on a blank message. Checking that
    /// there is something to commit is the caller's job.
    pub fn create(&self, draft: NewCommit) -> VcResult<Commit> {
        Commit::build(draft)
    }

    pub fn persist(&self, commit: &Commit) -> VcResult<()> {
        let commit_path = self.commit_path(commit.hash());

        if commit_path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.path).io_context(|| {
            format!("unable to create commit directory {}", self.path.display())
        })?;

        let content = Self::compress(serde_json::to_vec(commit)?.into())?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.path)
            .io_context(|| format!("unable to create temp file in {}", self.path.display()))?;
        temp_file
            .write_all(&content)
            .io_context(|| format!("unable to write commit {}", commit.hash()))?;
        temp_file
            .persist(&commit_path)
            .map_err(|e| VcError::io(format!("unable to persist commit {}", commit.hash()), e.error))?;

        tracing::debug!(hash = %commit.hash(), branch = %commit.branch(), "persisted commit");
        Ok(())
    }

    pub fn load(&self, oid: &ObjectId) -> VcResult<Commit> {
        let commit_path = self.commit_path(oid);

        if !commit_path.is_file() {
            return Err(VcError::CommitNotFound(oid.to_string()));
        }

        let content = std::fs::read(&commit_path)
            .io_context(|| format!("unable to read commit file {}", commit_path.display()))?;
        let content = Self::decompress(content.into())?;

        Ok(serde_json::from_slice(&content)?)
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.commit_path(oid).is_file()
    }

    /// Resolve a full or abbreviated commit hash
    ///
    /// Abbreviations need at least [`MIN_PREFIX_LENGTH`] characters and must
    /// match exactly one stored commit.
    pub fn resolve(&self, revision: &str) -> VcResult<ObjectId> {
        let revision = revision.trim();

        if let Ok(oid) = ObjectId::try_parse(revision) {
            return if self.exists(&oid) {
                Ok(oid)
            } else {
                Err(VcError::CommitNotFound(revision.to_string()))
            };
        }

        if revision.len() < MIN_PREFIX_LENGTH || !revision.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(VcError::CommitNotFound(revision.to_string()));
        }

        let mut matches = self.find_commits_by_prefix(revision)?;
        match matches.len() {
            0 => Err(VcError::CommitNotFound(revision.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(VcError::AmbiguousCommit {
                prefix: revision.to_string(),
                candidates: matches.iter().map(|oid| oid.to_short_oid()).collect(),
            }),
        }
    }

    /// Find all commits whose hash starts with the given prefix, sorted
    pub fn find_commits_by_prefix(&self, prefix: &str) -> VcResult<Vec<ObjectId>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.path)
            .io_context(|| format!("unable to list {}", self.path.display()))?;

        let mut matches = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| ObjectId::try_parse(entry.file_name().to_string_lossy()).ok())
            .filter(|oid| oid.matches_prefix(prefix))
            .collect::<Vec<_>>();
        matches.sort();

        Ok(matches)
    }

    fn commit_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.as_ref())
    }

    fn compress(data: Bytes) -> VcResult<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .io_context(|| "unable to compress commit record")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .io_context(|| "unable to finish compressing commit record")
    }

    fn decompress(data: Bytes) -> VcResult<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .io_context(|| "unable to decompress commit record")?;

        Ok(decompressed_content.into())
    }
}
