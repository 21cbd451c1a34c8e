//! The packaging run.
//!
//! A run is a straight line of steps: seed the scratch directory, build the
//! tar archive, compress it, hash the result. The first failing step aborts
//! the rest. Cleanup runs afterwards whatever happened, removing the scratch
//! directory and the intermediate tar file; the `.tar.zst` is kept.

use crate::archive::{build_tar, compress};
use crate::checksum::sha256_file;
use crate::config::{CollisionPolicy, PackagerConfig};
use crate::error::{CleanupError, PackagingError};
use crate::manifest::ManifestEntry;
use crate::naming::{ArtefactName, ArtefactPaths};
use crate::output::Reporter;
use crate::scratch::{Removal, create_scratch, remove_dir_if_present, remove_file_if_present};
use crate::sha256_digest::Sha256Digest;
use crate::version::PackageVersion;
use log::{debug, info, warn};
use std::path::PathBuf;

/// The artefact produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Identity of the packaged artefact.
    pub artefact: ArtefactName,
    /// Path of the retained `.tar.zst` archive.
    pub archive_path: PathBuf,
    /// SHA-256 of the archive's bytes.
    pub checksum: Sha256Digest,
}

impl PackageOutput {
    /// The `packages.json` entry describing this archive.
    #[must_use]
    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry::new(&self.artefact, self.checksum.clone())
    }
}

/// Everything that happened during a run.
#[derive(Debug)]
pub struct RunReport {
    /// Paths the run used.
    pub paths: ArtefactPaths,
    /// Outcome of the packaging steps.
    pub result: Result<PackageOutput, PackagingError>,
    /// Outcome of each cleanup removal, scratch directory first.
    pub cleanup: Vec<Result<Removal, CleanupError>>,
}

impl RunReport {
    /// Whether packaging succeeded and every cleanup removal succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.cleanup.iter().all(Result::is_ok)
    }

    /// Process exit status for this run: `0` on full success, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }
}

/// Package `config` at `version`, report progress to `reporter`, then clean up.
///
/// Never returns early: every failure is captured in the returned
/// [`RunReport`] and the cleanup phase always runs.
#[must_use]
pub fn run(
    config: &PackagerConfig,
    version: &PackageVersion,
    reporter: &mut Reporter<'_>,
) -> RunReport {
    let artefact = ArtefactName::new(config.name.clone(), version.clone());
    let paths = ArtefactPaths::new(config.output_dir.as_deref(), &artefact);

    let result = package(config, &artefact, &paths, reporter);
    match &result {
        Ok(output) => {
            info!(
                "packaged {} with sha256 {}",
                output.archive_path.display(),
                output.checksum
            );
            reporter.results(output);
        }
        Err(err) => {
            debug!("packaging aborted: {err:?}");
            reporter.failure(err);
        }
    }

    let cleanup = clean_up(&paths, reporter);
    RunReport {
        paths,
        result,
        cleanup,
    }
}

/// Run the packaging steps, stopping at the first failure.
fn package(
    config: &PackagerConfig,
    artefact: &ArtefactName,
    paths: &ArtefactPaths,
    reporter: &mut Reporter<'_>,
) -> Result<PackageOutput, PackagingError> {
    refuse_existing_output(config.on_collision, paths)?;

    reporter.progress(format!(
        "Creating temporary directory: {}",
        paths.scratch_dir.display()
    ));
    let scratch = create_scratch(
        &paths.scratch_dir,
        &config.payload_file,
        &config.payload_text(),
    )?;
    reporter.progress(format!(
        "Created dummy file: {}",
        scratch.payload_path().display()
    ));

    reporter.progress(format!("Creating tar archive: {}", paths.tar_path.display()));
    build_tar(scratch.root(), &paths.tar_path)?;

    reporter.progress(format!(
        "Compressing with Zstandard: {}",
        paths.archive_path.display()
    ));
    compress(&paths.tar_path, &paths.archive_path, config.on_collision)?;

    reporter.progress(format!(
        "Calculating SHA256 checksum of {}",
        paths.archive_path.display()
    ));
    let checksum = sha256_file(&paths.archive_path)?;

    Ok(PackageOutput {
        artefact: artefact.clone(),
        archive_path: paths.archive_path.clone(),
        checksum,
    })
}

/// Fail fast when the output exists and must not be replaced.
///
/// The final rename re-checks, so a file appearing after this point is still
/// never clobbered.
fn refuse_existing_output(
    policy: CollisionPolicy,
    paths: &ArtefactPaths,
) -> Result<(), PackagingError> {
    if policy == CollisionPolicy::Fail && paths.archive_path.exists() {
        return Err(PackagingError::OutputExists {
            path: paths.archive_path.clone(),
        });
    }
    Ok(())
}

/// Remove the scratch directory and the intermediate tar file.
fn clean_up(
    paths: &ArtefactPaths,
    reporter: &mut Reporter<'_>,
) -> Vec<Result<Removal, CleanupError>> {
    reporter.cleanup_started(&paths.scratch_dir);
    let outcomes = vec![
        remove_dir_if_present(&paths.scratch_dir),
        remove_file_if_present(&paths.tar_path),
    ];
    for err in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
        warn!("{err}");
        reporter.cleanup_failed(err);
    }
    outcomes
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
