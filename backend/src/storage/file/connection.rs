use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileConnection anchors the file-backed stores to a base directory.
#[derive(Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new(base_directory: impl Into<PathBuf>) -> Result<Self> {
        let base_directory = base_directory.into();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)?;
        }
        Ok(Self { base_directory })
    }

    /// The directory all dataset files live under.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}
