//! Font resolution seam.
//!
//! The engine never downloads fonts; acquisition (including the HTTP fetch
//! into the cache directory) belongs to the host collaborator. Here a font is
//! an opaque handle resolved to raw bytes through an injected `FontSource`,
//! acquired once per invocation and reused for every draw.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opaque font identifier: a file name inside the host's cache directory, or
/// an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontHandle(pub String);

impl FontHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

pub trait FontSource {
    /// Resolve a handle to raw font-file bytes. A missing or unreadable
    /// resource is surfaced as-is; there is no retry.
    fn load(&self, handle: &FontHandle) -> Result<Vec<u8>, Error>;
}

/// Font source backed by a local cache directory. Lookup is a plain
/// existence check; a corrupted cache entry is not detected here and fails
/// later at rasterization time.
pub struct DirFontSource {
    cache_dir: PathBuf,
}

impl DirFontSource {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    fn resolve(&self, handle: &FontHandle) -> PathBuf {
        let as_path = Path::new(&handle.0);
        if as_path.is_absolute() {
            as_path.to_path_buf()
        } else {
            self.cache_dir.join(as_path)
        }
    }
}

impl FontSource for DirFontSource {
    fn load(&self, handle: &FontHandle) -> Result<Vec<u8>, Error> {
        let path = self.resolve(handle);
        if !path.exists() {
            return Err(Error::FontLoad(format!(
                "font not found in cache: {}",
                path.display()
            )));
        }
        Ok(fs::read(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_is_a_font_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirFontSource::new(dir.path());
        let err = source.load(&FontHandle::new("nope.ttf")).unwrap_err();
        assert!(matches!(err, Error::FontLoad(_)));
    }

    #[test]
    fn cached_font_bytes_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.ttf");
        fs::write(&path, b"not really a font").unwrap();

        let source = DirFontSource::new(dir.path());
        let bytes = source.load(&FontHandle::new("mono.ttf")).unwrap();
        assert_eq!(bytes, b"not really a font");

        // absolute handles bypass the cache dir
        let abs = source
            .load(&FontHandle::new(path.to_string_lossy().to_string()))
            .unwrap();
        assert_eq!(abs, bytes);
    }
}
