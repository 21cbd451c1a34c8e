//! CLI argument definitions for the packager.
//!
//! Every flag is optional: with none, the packager builds the `nginx`
//! placeholder in the current directory. Flags override values from
//! `--config`, which in turn override the built-in defaults.

use crate::config::{CollisionPolicy, PackagerConfig};
use crate::error::ConfigError;
use crate::output::OutputMode;
use crate::package_name::PackageName;
use clap::Parser;
use std::path::PathBuf;

/// Fabricate a placeholder `.tar.zst` package and print its SHA-256.
#[derive(Parser, Debug)]
#[command(name = "flux-packager")]
#[command(version, about)]
#[command(long_about = concat!(
    "Fabricate a placeholder package artefact for the Flux package manager.\n\n",
    "A scratch directory holding a single README is archived with tar, ",
    "compressed with Zstandard and hashed with SHA-256. The compressed ",
    "archive is kept; the scratch directory and the intermediate tar file ",
    "are always removed. Copy the printed checksum into packages.json.",
))]
pub struct Cli {
    /// Package name used in every artefact name [default: nginx].
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory that receives the artefacts [default: current directory].
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with packaging settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail instead of replacing an existing archive of the same version.
    #[arg(long)]
    pub no_clobber: bool,

    /// Print only the manifest entry as JSON.
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Suppress progress output (results and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Build the run configuration from `--config` and the individual flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be loaded or a flag
    /// value is invalid.
    pub fn resolve_config(&self) -> Result<PackagerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => PackagerConfig::load(path)?,
            None => PackagerConfig::default(),
        };
        if let Some(name) = &self.name {
            config.name = PackageName::try_from(name.as_str())?;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if self.no_clobber {
            config.on_collision = CollisionPolicy::Fail;
        }
        config.validate()?;
        Ok(config)
    }

    /// The reporter mode selected by `--json` / `--quiet`.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn no_arguments_yields_default_config() {
        let cli = Cli::parse_from(["flux-packager"]);
        assert_eq!(
            cli.resolve_config().expect("valid config"),
            PackagerConfig::default()
        );
        assert_eq!(cli.output_mode(), OutputMode::Human);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "flux-packager",
            "--name",
            "redis",
            "--output-dir",
            "/tmp/dist",
            "--no-clobber",
        ]);
        let config = cli.resolve_config().expect("valid config");
        assert_eq!(config.name.as_str(), "redis");
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/dist")));
        assert_eq!(config.on_collision, CollisionPolicy::Fail);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("flux-packager.toml");
        fs::write(&path, "name = \"caddy\"\npayload = \"custom\\n\"\n").expect("write config");
        let path_arg = path.to_str().expect("utf-8 path").to_owned();

        let cli = Cli::parse_from(["flux-packager", "--config", &path_arg, "--name", "redis"]);
        let config = cli.resolve_config().expect("valid config");
        assert_eq!(config.name.as_str(), "redis");
        assert_eq!(config.payload_text(), "custom\n");
    }

    #[test]
    fn invalid_name_is_rejected() {
        let cli = Cli::parse_from(["flux-packager", "--name", "../etc"]);
        assert!(matches!(
            cli.resolve_config(),
            Err(ConfigError::Identity(_))
        ));
    }

    #[rstest]
    #[case::json(&["flux-packager", "--json"], OutputMode::Json)]
    #[case::quiet(&["flux-packager", "-q"], OutputMode::Quiet)]
    #[case::long_quiet(&["flux-packager", "--quiet"], OutputMode::Quiet)]
    fn output_mode_follows_flags(#[case] args: &[&str], #[case] expected: OutputMode) {
        assert_eq!(Cli::parse_from(args).output_mode(), expected);
    }

    #[test]
    fn json_and_quiet_conflict() {
        Cli::try_parse_from(["flux-packager", "--json", "--quiet"])
            .expect_err("expected clap to reject conflicting flags");
    }

    #[test]
    fn positional_arguments_are_rejected() {
        Cli::try_parse_from(["flux-packager", "extra"])
            .expect_err("expected clap to reject positional arguments");
    }
}
