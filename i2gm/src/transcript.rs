//! Transcript file output with collision-free naming.
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;

/// Write `text` into `dir` under the first free name in the sequence
/// `output.txt`, `output_1.txt`, `output_2.txt`, … — existing files are
/// never overwritten. The check is a plain existence probe, so concurrent
/// invocations racing on the same directory may still collide.
pub fn write_unique(dir: &Path, text: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir)?;

    let mut path = dir.join("output.txt");
    let mut n = 1u32;
    while path.exists() {
        path = dir.join(format!("output_{n}.txt"));
        n += 1;
    }

    fs::write(&path, text)?;
    debug!("wrote transcript to {}", path.display());
    Ok(path)
}
