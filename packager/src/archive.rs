//! Tar construction and Zstandard compression.
//!
//! The tar archive holds the scratch directory as its single top-level
//! member, named by the directory's base name rather than its full path.
//! Compression streams the tar file into a temporary file beside the
//! destination and renames it into place, so a `.tar.zst` is either absent,
//! the previous complete archive, or the new complete archive.

use crate::config::CollisionPolicy;
use crate::error::PackagingError;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Compression level handed to zstd; `0` selects the library default.
const ZSTD_DEFAULT_LEVEL: i32 = 0;

/// Archive `source_dir` into a new tar file at `tar_path`.
///
/// # Errors
///
/// Returns [`PackagingError::ArchiveFailed`] if the directory has no base
/// name, cannot be read, or the tar file cannot be written.
pub fn build_tar(source_dir: &Path, tar_path: &Path) -> Result<(), PackagingError> {
    let fail = |source| PackagingError::ArchiveFailed {
        path: tar_path.to_path_buf(),
        source,
    };
    let member = source_dir
        .file_name()
        .ok_or_else(|| fail(io::Error::other("source directory has no base name")))?;

    let file = fs::File::create(tar_path).map_err(fail)?;
    let mut builder = tar::Builder::new(file);
    builder.append_dir_all(member, source_dir).map_err(fail)?;
    let file = builder.into_inner().map_err(fail)?;
    file.sync_all().map_err(fail)?;
    debug!("wrote tar archive {}", tar_path.display());
    Ok(())
}

/// Compress `tar_path` into `archive_path` with the default zstd settings.
///
/// # Errors
///
/// Returns [`PackagingError::OutputExists`] when `policy` is
/// [`CollisionPolicy::Fail`] and `archive_path` already exists, and
/// [`PackagingError::CompressionFailed`] for any other I/O failure.
pub fn compress(
    tar_path: &Path,
    archive_path: &Path,
    policy: CollisionPolicy,
) -> Result<(), PackagingError> {
    let fail = |source| PackagingError::CompressionFailed {
        path: archive_path.to_path_buf(),
        source,
    };

    let input = fs::File::open(tar_path).map_err(fail)?;
    let mut staged = NamedTempFile::new_in(staging_dir(archive_path)).map_err(fail)?;
    zstd::stream::copy_encode(input, staged.as_file_mut(), ZSTD_DEFAULT_LEVEL).map_err(fail)?;
    staged.as_file().sync_all().map_err(fail)?;

    let persisted = match policy {
        CollisionPolicy::Overwrite => staged.persist(archive_path),
        CollisionPolicy::Fail => staged.persist_noclobber(archive_path),
    };
    match persisted {
        Ok(_) => {
            debug!("wrote compressed archive {}", archive_path.display());
            Ok(())
        }
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(PackagingError::OutputExists {
                path: archive_path.to_path_buf(),
            })
        }
        Err(err) => Err(fail(err.error)),
    }
}

/// Directory in which the temporary compressed file is staged.
fn staging_dir(archive_path: &Path) -> &Path {
    archive_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
