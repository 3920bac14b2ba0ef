use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, TrombiError};

#[derive(Clone, Debug)]
pub enum PhotoSource {
    /// Read on demand, whole file at a time.
    File(PathBuf),
    Memory(Arc<[u8]>),
}

/// A handle on an image file: its original name plus where its bytes live.
#[derive(Clone, Debug)]
pub struct Photo {
    name: String,
    source: PhotoSource,
}

impl Photo {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| TrombiError::Format(format!("not a file path: {}", path.display())))?;
        Ok(Self {
            name,
            source: PhotoSource::File(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: PhotoSource::Memory(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension after the last dot, as written; `None` when the name has no usable one.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            PhotoSource::File(p) => Ok(fs::read(p)?),
            PhotoSource::Memory(b) => Ok(b.to_vec()),
        }
    }
}

pub(crate) fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_string())
}
