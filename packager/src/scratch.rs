//! Scratch directory handling.
//!
//! The scratch directory exists only to seed the archive. Creation is
//! idempotent so a directory left behind by an interrupted run is reused;
//! removal uses the native recursive delete and treats an already missing
//! path as success.

use crate::error::{CleanupError, PackagingError};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A scratch directory seeded with its payload file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    root: PathBuf,
    payload_path: PathBuf,
}

impl ScratchDir {
    /// Root of the scratch tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the payload file inside the scratch tree.
    #[must_use]
    pub fn payload_path(&self) -> &Path {
        &self.payload_path
    }
}

/// Outcome of a successful removal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path existed and was removed.
    Removed,
    /// Nothing was at the path.
    Absent,
}

/// Create `root` (and any missing parents) and write `contents` to
/// `root/payload_file`, replacing an existing file.
///
/// # Errors
///
/// Returns [`PackagingError::ScratchSetupFailed`] naming the directory or
/// file that could not be written.
pub fn create_scratch(
    root: &Path,
    payload_file: &str,
    contents: &str,
) -> Result<ScratchDir, PackagingError> {
    fs::create_dir_all(root).map_err(|source| PackagingError::ScratchSetupFailed {
        path: root.to_path_buf(),
        source,
    })?;
    let payload_path = root.join(payload_file);
    if let Err(source) = fs::write(&payload_path, contents) {
        return Err(PackagingError::ScratchSetupFailed {
            path: payload_path,
            source,
        });
    }
    debug!("seeded scratch directory {}", root.display());
    Ok(ScratchDir {
        root: root.to_path_buf(),
        payload_path,
    })
}

/// Recursively remove a directory if it exists.
///
/// # Errors
///
/// Returns [`CleanupError`] if the directory exists but cannot be removed.
pub fn remove_dir_if_present(path: &Path) -> Result<Removal, CleanupError> {
    remove_if_present(path, || fs::remove_dir_all(path))
}

/// Remove a file if it exists.
///
/// # Errors
///
/// Returns [`CleanupError`] if the file exists but cannot be removed.
pub fn remove_file_if_present(path: &Path) -> Result<Removal, CleanupError> {
    remove_if_present(path, || fs::remove_file(path))
}

/// Whether a failed lookup means nothing can exist at the path: either the
/// path is missing or one of its ancestors is not a directory.
fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn remove_if_present(
    path: &Path,
    remove: impl FnOnce() -> io::Result<()>,
) -> Result<Removal, CleanupError> {
    let fail = |source| CleanupError {
        path: path.to_path_buf(),
        source,
    };
    match fs::symlink_metadata(path) {
        Ok(_) => {}
        Err(err) if is_absent(&err) => return Ok(Removal::Absent),
        Err(err) => return Err(fail(err)),
    }
    match remove() {
        Ok(()) => {
            debug!("removed {}", path.display());
            Ok(Removal::Removed)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Removal::Absent),
        Err(source) => Err(fail(source)),
    }
}
