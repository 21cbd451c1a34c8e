//! SHA-256 checksums of finished archives.
//!
//! The archive is read back whole once the compressor has closed it, so the
//! digest always describes the bytes that were actually persisted.

use crate::error::PackagingError;
use crate::sha256_digest::Sha256Digest;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Compute the SHA-256 digest of a byte slice.
#[must_use]
pub fn sha256_bytes(bytes: &[u8]) -> Sha256Digest {
    Sha256Digest::from_hasher_hex(format!("{:x}", Sha256::digest(bytes)))
}

/// Compute the SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns [`PackagingError::ChecksumFailed`] if the file cannot be read.
pub fn sha256_file(path: &Path) -> Result<Sha256Digest, PackagingError> {
    let bytes = fs::read(path).map_err(|source| PackagingError::ChecksumFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha256_bytes(&bytes))
}
