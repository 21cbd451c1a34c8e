//! Packaging configuration.
//!
//! `PackagerConfig` gathers everything a run needs: the package name, the
//! payload written into the scratch directory, where artefacts land and how
//! an existing output archive is treated. Values come from built-in
//! defaults, optionally overlaid by a TOML file and then by CLI flags.
//!
//! ```toml
//! name = "redis"
//! payload_file = "README.txt"
//! output_dir = "dist"
//! on_collision = "fail"
//! ```

use crate::error::ConfigError;
use crate::package_name::PackageName;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The payload file name used when none is configured.
pub const DEFAULT_PAYLOAD_FILE: &str = "README.txt";

/// What to do when the output archive already exists.
///
/// Two runs within the same second derive the same version and therefore the
/// same output file name.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Atomically replace the existing archive.
    #[default]
    Overwrite,
    /// Abort the run and leave the existing archive untouched.
    Fail,
}

/// Configuration for a single packaging run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// Package name embedded in every artefact name.
    pub name: PackageName,
    /// Name of the placeholder file inside the scratch directory.
    pub payload_file: String,
    /// Placeholder file contents. When unset, a two-line notice naming the
    /// package is used (see [`PackagerConfig::payload_text`]).
    pub payload: Option<String>,
    /// Directory that receives all artefacts; the working directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Treatment of an already existing output archive.
    pub on_collision: CollisionPolicy,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            name: PackageName::default(),
            payload_file: DEFAULT_PAYLOAD_FILE.to_owned(),
            payload: None,
            output_dir: None,
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl PackagerConfig {
    /// Parse a configuration from TOML text.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::InvalidPayloadFile`] when validation fails.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// the errors of [`PackagerConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPayloadFile`] when the payload file name
    /// is empty or is not a single normal path component.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reject = |reason: &str| ConfigError::InvalidPayloadFile {
            value: self.payload_file.clone(),
            reason: reason.to_owned(),
        };
        if self.payload_file.is_empty() {
            return Err(reject("file name must not be empty"));
        }
        let path = Path::new(&self.payload_file);
        if path.file_name() != Some(path.as_os_str()) {
            return Err(reject("file name must be a single path component"));
        }
        Ok(())
    }

    /// The exact bytes written into the payload file.
    #[must_use]
    pub fn payload_text(&self) -> String {
        self.payload.clone().unwrap_or_else(|| {
            format!(
                "This is a dummy file for the {} package.\n\
                 This content should be used to generate a consistent checksum.\n",
                self.name
            )
        })
    }
}
