use crate::assets::{FetchSnafu, LoadError};
use snafu::ResultExt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Where model bytes come from. Fetching happens on the loader thread.
pub trait AssetSource: Debug + Send + 'static {
    /// Human readable name for logs
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Directory relative buffer URIs resolve against. Without one only embedded buffers load.
    fn base_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl AssetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        std::fs::read(&self.path).context(FetchSnafu {
            path: self.path.clone(),
        })
    }

    fn base_dir(&self) -> Option<PathBuf> {
        self.path.parent().map(Path::to_path_buf)
    }
}

#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl AssetSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }
}
