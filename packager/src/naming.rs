//! File naming policy for a packaging run.
//!
//! Every path the packager touches is derived from the package name and
//! version: `temp_<name>/` for scratch work, `<name>-<version>.tar` for the
//! intermediate archive and `<name>-<version>.tar.zst` for the deliverable.

use crate::package_name::PackageName;
use crate::version::PackageVersion;
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix of the scratch directory name.
const SCRATCH_PREFIX: &str = "temp_";

/// Extension of the intermediate archive.
const TAR_EXTENSION: &str = ".tar";

/// Extension appended to the tar name for the compressed archive.
const ZSTD_EXTENSION: &str = ".zst";

/// Package identity from which all run artefact names are derived.
///
/// # Examples
///
/// ```
/// use flux_packager::naming::ArtefactName;
/// use flux_packager::package_name::PackageName;
/// use flux_packager::version::PackageVersion;
///
/// let name = ArtefactName::new(
///     PackageName::default(),
///     PackageVersion::try_from("20260215120000").expect("valid version"),
/// );
/// assert_eq!(name.to_string(), "nginx-20260215120000.tar.zst");
/// assert_eq!(name.tar_filename(), "nginx-20260215120000.tar");
/// assert_eq!(name.scratch_dir_name(), "temp_nginx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    name: PackageName,
    version: PackageVersion,
}

impl ArtefactName {
    /// Create an artefact name from validated components.
    #[must_use]
    pub fn new(name: PackageName, version: PackageVersion) -> Self {
        Self { name, version }
    }

    /// Return the package name component.
    #[must_use]
    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Return the version component.
    #[must_use]
    pub fn version(&self) -> &PackageVersion {
        &self.version
    }

    /// Name of the scratch directory, which is also the archive's top-level member.
    #[must_use]
    pub fn scratch_dir_name(&self) -> String {
        format!("{SCRATCH_PREFIX}{}", self.name)
    }

    /// Name of the intermediate tar archive.
    #[must_use]
    pub fn tar_filename(&self) -> String {
        format!("{}-{}{TAR_EXTENSION}", self.name, self.version)
    }

    /// Name of the compressed deliverable.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ZSTD_EXTENSION}", self.tar_filename())
    }
}

/// Concrete locations of a run's artefacts.
///
/// With no root the paths are bare relative names, resolved against the
/// process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactPaths {
    /// Scratch directory seeded with the payload file.
    pub scratch_dir: PathBuf,
    /// Intermediate tar archive.
    pub tar_path: PathBuf,
    /// Retained `.tar.zst` archive.
    pub archive_path: PathBuf,
}

impl ArtefactPaths {
    /// Lay out the artefacts of `name` under `root`.
    #[must_use]
    pub fn new(root: Option<&Path>, name: &ArtefactName) -> Self {
        let place = |file: String| root.map_or_else(|| PathBuf::from(&file), |dir| dir.join(&file));
        Self {
            scratch_dir: place(name.scratch_dir_name()),
            tar_path: place(name.tar_filename()),
            archive_path: place(name.filename()),
        }
    }
}
