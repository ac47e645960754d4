//! Content-addressed blob store
//!
//! Whole-file snapshots live under `blobs/<sha1-of-bytes>/<file-name>`.
//! Identical content always lands in the same directory, so storing it again
//! is a no-op; the same content added under another name gains a second file
//! in that directory.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoContext, VcError, VcResult};
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BlobStore {
    path: Box<Path>,
}

impl BlobStore {
    pub fn new(path: Box<Path>) -> Self {
        BlobStore { path }
    }

    pub fn blobs_path(&self) -> &Path {
        &self.path
    }

    /// Store `content` as the blob for `file_name`, returning its hash
    pub fn put(&self, file_name: &str, content: &[u8]) -> VcResult<ObjectId> {
        let oid = ObjectId::digest(content);
        let blob_path = self.blob_path(&oid, file_name);

        // write the blob to disk unless it already exists
        if blob_path.exists() {
            tracing::debug!(%oid, file_name, "blob already stored");
            return Ok(oid);
        }

        let blob_dir = self.path.join(oid.as_ref());
        std::fs::create_dir_all(&blob_dir)
            .io_context(|| format!("unable to create blob directory {}", blob_dir.display()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&blob_dir)
            .io_context(|| format!("unable to create temp file in {}", blob_dir.display()))?;
        temp_file
            .write_all(content)
            .io_context(|| format!("unable to write blob {oid}"))?;

        // rename the temp file to the blob file to make it atomic
        temp_file
            .persist(&blob_path)
            .map_err(|e| VcError::io(format!("unable to persist blob {oid}"), e.error))?;

        tracing::debug!(%oid, file_name, bytes = content.len(), "stored blob");
        Ok(oid)
    }

    /// Read the content stored for `file_name` under `oid`
    pub fn get(&self, oid: &ObjectId, file_name: &str) -> VcResult<Bytes> {
        let blob_path = self.blob_path(oid, file_name);

        if !blob_path.is_file() {
            return Err(VcError::NotFound {
                hash: oid.to_string(),
                file: file_name.to_string(),
            });
        }

        std::fs::read(&blob_path)
            .map(Bytes::from)
            .io_context(|| format!("unable to read blob file {}", blob_path.display()))
    }

    pub fn contains(&self, oid: &ObjectId, file_name: &str) -> bool {
        self.blob_path(oid, file_name).is_file()
    }

    /// Blobs are filed under the base name; directories in the working path
    /// do not matter to the content address.
    fn blob_path(&self, oid: &ObjectId, file_name: &str) -> PathBuf {
        let base_name = Path::new(file_name)
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| file_name.into());

        self.path.join(oid.as_ref()).join(base_name)
    }
}
