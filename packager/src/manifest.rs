//! Manifest entry for `packages.json`.
//!
//! The packager never edits a manifest itself; it prints the fragment a
//! maintainer pastes into the package index by hand.

use crate::naming::ArtefactName;
use crate::sha256_digest::Sha256Digest;
use serde::Serialize;

/// The manifest fields that describe one packaged artefact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Package name.
    pub name: String,
    /// Timestamp-derived version.
    pub version: String,
    /// Location of the compressed archive; the bare file name until the
    /// archive is uploaded somewhere.
    pub url: String,
    /// Lowercase hex SHA-256 of the compressed archive.
    pub checksum: Sha256Digest,
}

impl ManifestEntry {
    /// Describe the archive identified by `artefact` with digest `checksum`.
    #[must_use]
    pub fn new(artefact: &ArtefactName, checksum: Sha256Digest) -> Self {
        Self {
            name: artefact.name().to_string(),
            version: artefact.version().to_string(),
            url: artefact.filename(),
            checksum,
        }
    }

    /// Render the entry as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; the entry holds only strings, so this
    /// does not fail in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
