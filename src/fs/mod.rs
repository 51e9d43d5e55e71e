// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempPath;

pub mod mock;

/// Abstract filesystem interface used by the validation rules.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>>;
    fn exists(&self, path: &Path) -> bool;

    /// Write `contents` to a new, uniquely named file ending in `suffix`.
    ///
    /// The returned artifact owns the file: dropping it removes the file
    /// (for implementations that create real files).
    fn persist_temp(&self, suffix: &str, contents: &[u8]) -> Result<TempArtifact>;
}

/// A file created by [`FileSystem::persist_temp`].
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    guard: Option<TempPath>,
}

impl TempArtifact {
    /// An artifact that is not removed on drop.
    pub fn untracked(path: PathBuf) -> Self {
        Self { path, guard: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Implementation that uses `std::fs` and `tempfile`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>> {
        // Opening a directory succeeds on unix; reading it does not.
        if path.is_dir() {
            anyhow::bail!("{:?} is a directory", path);
        }
        let file = fs::File::open(path).with_context(|| format!("opening file {:?}", path))?;
        Ok(Box::new(file))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn persist_temp(&self, suffix: &str, contents: &[u8]) -> Result<TempArtifact> {
        let mut file = tempfile::Builder::new()
            .prefix("mailgate-")
            .suffix(suffix)
            .tempfile()
            .context("creating temporary file")?;
        file.write_all(contents)
            .with_context(|| format!("writing to temporary file {:?}", file.path()))?;
        file.flush()?;

        let temp_path = file.into_temp_path();
        Ok(TempArtifact {
            path: temp_path.to_path_buf(),
            guard: Some(temp_path),
        })
    }
}
