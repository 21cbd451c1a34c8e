//! Package name newtype.
//!
//! The name is embedded in the scratch directory and every file name the
//! packager writes, so it is restricted to a conservative character set
//! that can never introduce a path separator or parent-directory reference.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted package name.
const MAX_NAME_LEN: usize = 64;

/// The package name used when none is configured.
pub const DEFAULT_PACKAGE_NAME: &str = "nginx";

/// A validated package name.
///
/// # Examples
///
/// ```
/// use flux_packager::package_name::PackageName;
///
/// let name = PackageName::try_from("nginx").expect("valid name");
/// assert_eq!(name.as_str(), "nginx");
/// assert!(PackageName::try_from("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PackageName {
    fn default() -> Self {
        Self(DEFAULT_PACKAGE_NAME.to_owned())
    }
}

impl TryFrom<&str> for PackageName {
    type Error = IdentityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageName {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_name(value: &str) -> Result<(), IdentityError> {
    let reject = |reason: String| IdentityError::InvalidPackageName {
        value: value.to_owned(),
        reason,
    };

    if value.is_empty() {
        return Err(reject("name must not be empty".to_owned()));
    }
    if value.len() > MAX_NAME_LEN {
        return Err(reject(format!(
            "name must be at most {MAX_NAME_LEN} characters, got {}",
            value.len()
        )));
    }
    if value.starts_with(['.', '-']) {
        return Err(reject("name must not start with '.' or '-'".to_owned()));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(reject(format!("unsupported character '{bad}'")));
    }
    Ok(())
}
