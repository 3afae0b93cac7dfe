//! Local-disk storage for activity evidence files.
//!
//! Files are written flat into the configured upload directory under the
//! collision-free names produced by
//! [`stored_file_name`](inci_core::uploads::stored_file_name). Only the
//! stored name is persisted in the database.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use inci_core::uploads::stored_file_name;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an upload and return its stored name.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let unique = Uuid::new_v4().simple().to_string();
        let stored = stored_file_name(original_name, Utc::now(), &unique[..12]);
        tokio::fs::write(self.root.join(&stored), data).await?;

        tracing::debug!(stored = %stored, size = data.len(), "Stored upload");
        Ok(stored)
    }

    pub async fn read(&self, stored_name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_of(stored_name)?).await
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, stored_name: &str) -> io::Result<bool> {
        match tokio::fs::remove_file(self.path_of(stored_name)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Resolve a stored name inside the upload directory, refusing anything
    /// that is not a plain file name.
    fn path_of(&self, stored_name: &str) -> io::Result<PathBuf> {
        let name = Path::new(stored_name);
        match name.file_name() {
            Some(file) if file == name.as_os_str() => Ok(self.root.join(file)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid stored file name '{stored_name}'"),
            )),
        }
    }
}
