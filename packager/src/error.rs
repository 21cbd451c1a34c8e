//! Error types for the packager.
//!
//! Packaging failures are split by the step that raised them so callers can
//! assert on the category rather than the message text. Cleanup failures are
//! reported separately because they never abort the remaining removals.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from invalid identity values (names, versions, digests).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// A package name is empty, too long, or contains forbidden characters.
    #[error("invalid package name \"{value}\": {reason}")]
    InvalidPackageName {
        /// The rejected name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A version string is not a `YYYYMMDDHHMMSS` timestamp.
    #[error("invalid package version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A SHA-256 digest is not a valid 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },
}

/// Errors raised while assembling a [`crate::config::PackagerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying deserialisation error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The payload file name is empty or not a single path component.
    #[error("invalid payload file name \"{value}\": {reason}")]
    InvalidPayloadFile {
        /// The rejected file name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// An identity value supplied on the command line was rejected.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// The packaging step a [`PackagingError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Creating the scratch directory or writing the payload failed.
    ScratchSetup,
    /// Building the intermediate tar archive failed.
    Archive,
    /// Compressing the tar archive failed.
    Compression,
    /// Reading or hashing the compressed archive failed.
    Checksum,
    /// The output archive already exists and overwriting was refused.
    OutputExists,
}

/// Errors that abort the packaging steps of a run.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The scratch directory or its payload file could not be created.
    #[error("failed to prepare scratch directory {}: {source}", .path.display())]
    ScratchSetupFailed {
        /// Path that could not be created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The intermediate tar archive could not be written.
    #[error("failed to create tar archive {}: {source}", .path.display())]
    ArchiveFailed {
        /// Path of the tar archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The Zstandard stream could not be produced.
    #[error("failed to compress {}: {source}", .path.display())]
    CompressionFailed {
        /// Path of the compressed archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The compressed archive could not be read back for hashing.
    #[error("failed to compute checksum of {}: {source}", .path.display())]
    ChecksumFailed {
        /// Path of the compressed archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output archive exists and the collision policy forbids replacing it.
    #[error("output file {} already exists; refusing to overwrite", .path.display())]
    OutputExists {
        /// Path of the existing archive.
        path: PathBuf,
    },
}

impl PackagingError {
    /// Return the packaging step this error belongs to.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ScratchSetupFailed { .. } => FailureKind::ScratchSetup,
            Self::ArchiveFailed { .. } => FailureKind::Archive,
            Self::CompressionFailed { .. } => FailureKind::Compression,
            Self::ChecksumFailed { .. } => FailureKind::Checksum,
            Self::OutputExists { .. } => FailureKind::OutputExists,
        }
    }
}

/// A scratch artefact could not be removed.
#[derive(Debug, Error)]
#[error("failed to remove {}: {source}", .path.display())]
pub struct CleanupError {
    /// Path that could not be removed.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}
