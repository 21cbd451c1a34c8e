//! Progress and result reporting.
//!
//! All user-facing text goes through [`Reporter`], which writes to an
//! injected writer so the binary can hand it stdout and tests a `Vec<u8>`.
//! Writes are best-effort: a closed stdout must not stop cleanup.

use crate::error::{CleanupError, PackagingError};
use crate::pipeline::PackageOutput;
use log::warn;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Heading printed above the results block.
pub const RESULTS_HEADING: &str = "--- Results for your packages.json file ---";

/// How much the reporter prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines, results block and cleanup lines.
    #[default]
    Human,
    /// Results block and errors only.
    Quiet,
    /// The manifest entry as a single JSON document, plus errors.
    Json,
}

/// Writes run progress, results and failures.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    mode: OutputMode,
}

impl<'a> Reporter<'a> {
    /// Create a reporter writing to `out`.
    #[must_use]
    pub fn new(out: &'a mut dyn Write, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    /// Report a packaging step that is about to run.
    pub fn progress(&mut self, message: impl Display) {
        if self.mode == OutputMode::Human {
            self.line(message);
        }
    }

    /// Report a successful run.
    pub fn results(&mut self, output: &PackageOutput) {
        let entry = output.manifest_entry();
        let json = entry.to_json().unwrap_or_else(|err| {
            warn!("could not render manifest entry: {err}");
            String::new()
        });

        if self.mode == OutputMode::Json {
            self.line(json);
            return;
        }

        self.line("");
        self.line(RESULTS_HEADING);
        self.line(format!("File created: {}", output.archive_path.display()));
        self.line(format!("Checksum: {}", output.checksum));
        if !json.is_empty() {
            self.line("Manifest entry:");
            self.line(json);
        }
        self.line("");
        self.line("You can now use this checksum to update your packages.json file.");
    }

    /// Report the error that aborted packaging.
    pub fn failure(&mut self, err: &PackagingError) {
        self.line(format!("An error occurred: {err}"));
    }

    /// Announce the cleanup phase.
    pub fn cleanup_started(&mut self, scratch_dir: &Path) {
        if self.mode == OutputMode::Human {
            self.line("");
            self.line(format!(
                "Cleaning up temporary directory: {}",
                scratch_dir.display()
            ));
        }
    }

    /// Report a scratch artefact that could not be removed.
    pub fn cleanup_failed(&mut self, err: &CleanupError) {
        self.line(format!("Cleanup failed: {err}"));
    }

    fn line(&mut self, message: impl Display) {
        if writeln!(self.out, "{message}").is_err() {
            // Best-effort output; ignore write failures.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ArtefactName;
    use crate::package_name::PackageName;
    use crate::sha256_digest::Sha256Digest;
    use crate::version::PackageVersion;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;

    #[fixture]
    fn output() -> PackageOutput {
        PackageOutput {
            artefact: ArtefactName::new(
                PackageName::default(),
                PackageVersion::try_from("20260215120000").expect("valid version"),
            ),
            archive_path: PathBuf::from("nginx-20260215120000.tar.zst"),
            checksum: Sha256Digest::try_from("b".repeat(64)).expect("valid digest"),
        }
    }

    fn render(mode: OutputMode, report: impl FnOnce(&mut Reporter<'_>)) -> String {
        let mut buffer = Vec::new();
        let mut reporter = Reporter::new(&mut buffer, mode);
        report(&mut reporter);
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[rstest]
    fn human_results_block_names_file_and_checksum(output: PackageOutput) {
        let text = render(OutputMode::Human, |r| r.results(&output));
        assert!(text.contains(RESULTS_HEADING));
        assert!(text.contains("File created: nginx-20260215120000.tar.zst"));
        assert!(text.contains(&format!("Checksum: {}", "b".repeat(64))));
        assert!(text.contains("Manifest entry:\n{\n"));
        assert!(text.ends_with("update your packages.json file.\n"));
    }

    #[rstest]
    fn json_results_are_a_single_document(output: PackageOutput) {
        let text = render(OutputMode::Json, |r| {
            r.progress("Creating temporary directory: temp_nginx");
            r.results(&output);
            r.cleanup_started(Path::new("temp_nginx"));
        });
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(parsed["url"], "nginx-20260215120000.tar.zst");
    }

    #[rstest]
    #[case::human(OutputMode::Human, true)]
    #[case::quiet(OutputMode::Quiet, false)]
    #[case::json(OutputMode::Json, false)]
    fn progress_only_in_human_mode(#[case] mode: OutputMode, #[case] shown: bool) {
        let text = render(mode, |r| r.progress("Creating tar archive: nginx.tar"));
        assert_eq!(text.contains("Creating tar archive"), shown);
    }

    #[rstest]
    #[case::human(OutputMode::Human)]
    #[case::quiet(OutputMode::Quiet)]
    #[case::json(OutputMode::Json)]
    fn failures_are_always_reported(#[case] mode: OutputMode) {
        let err = PackagingError::OutputExists {
            path: PathBuf::from("nginx.tar.zst"),
        };
        let text = render(mode, |r| r.failure(&err));
        assert!(text.starts_with("An error occurred: "));
    }

    #[test]
    fn cleanup_header_follows_blank_line() {
        let text = render(OutputMode::Human, |r| r.cleanup_started(Path::new("temp_nginx")));
        assert_eq!(text, "\nCleaning up temporary directory: temp_nginx\n");
    }
}
