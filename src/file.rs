// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotDirectory { path: dir.to_path_buf() });
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Remove the directory if it exists, then re-create it empty.
pub fn reset_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        fs::remove_dir_all(dir)?;
    } else if dir.exists() {
        return Err(Error::NotDirectory { path: dir.to_path_buf() });
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Write an export payload byte-for-byte, creating parent dirs as needed.
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// First `NNNN.html` in `dir` that is not taken yet.
pub fn next_dump_path(dir: &Path) -> PathBuf {
    let mut i = 0u32;
    loop {
        let p = dir.join(format!("{i:04}.html"));
        if !p.exists() { return p; }
        i += 1;
    }
}
