//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Recursively copy a directory.
///
/// Dotfiles are included, file permissions are preserved and symlinks are
/// recreated rather than followed. Directories get default permissions so
/// the copy stays writable for the rewrite pass.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else if ty.is_symlink() {
            let target = fs::read_link(&src_path)
                .with_context(|| format!("failed to read link: {}", src_path.display()))?;
            symlink(&target, &dst_path).with_context(|| {
                format!(
                    "failed to link {} to {}",
                    dst_path.display(),
                    target.display()
                )
            })?;
        } else {
            fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Remove the named subdirectories of `root` (VCS metadata), returning the
/// ones that were present.
pub fn strip_dirs(root: &Path, names: &[String]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for name in names {
        let dir = root.join(name);
        if dir.symlink_metadata().is_err() {
            continue;
        }
        let result = if dir.is_dir() && !dir.is_symlink() {
            fs::remove_dir_all(&dir)
        } else {
            fs::remove_file(&dir)
        };
        result.with_context(|| format!("failed to remove {}", dir.display()))?;
        removed.push(dir);
    }
    Ok(removed)
}

/// A file written next to its target and renamed over it on commit.
///
/// Dropping an uncommitted `AtomicFile` deletes the temporary file and
/// leaves the target untouched.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp: NamedTempFile,
}

impl AtomicFile {
    /// Create a temporary sibling of `target`.
    pub fn create(target: &Path) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".goven-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        Ok(AtomicFile {
            target: target.to_path_buf(),
            temp,
        })
    }

    /// Path of the temporary file.
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Append bytes to the temporary file.
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.temp.write_all(bytes)
    }

    /// Flush, copy the target's permissions and rename into place.
    pub fn commit(self) -> io::Result<()> {
        self.commit_with(|temp, target| temp.persist(target).map(|_| ()).map_err(|e| e.error))
    }

    /// Like [`commit`](Self::commit) with a custom final rename step.
    pub fn commit_with<F>(mut self, rename: F) -> io::Result<()>
    where
        F: FnOnce(NamedTempFile, &Path) -> io::Result<()>,
    {
        self.temp.flush()?;
        if let Ok(meta) = fs::metadata(&self.target) {
            self.temp.as_file().set_permissions(meta.permissions())?;
        }
        self.temp.as_file().sync_all()?;
        rename(self.temp, &self.target)
    }
}

/// Atomically replace `path` with `contents`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = AtomicFile::create(path)?;
    file.write_all(contents)?;
    file.commit()
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Check if a path is inside another path.
pub fn is_inside(path: &Path, parent: &Path) -> bool {
    path.starts_with(parent)
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}
