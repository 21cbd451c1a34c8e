//! Timestamp-derived package version.
//!
//! Versions are the local wall-clock time at second resolution, rendered as
//! `YYYYMMDDHHMMSS`. Two runs within the same second therefore share a
//! version; see [`crate::config::CollisionPolicy`] for how that is handled.

use crate::error::IdentityError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt;

/// `strftime` pattern for package versions.
const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

/// Number of digits in a version string.
const VERSION_LEN: usize = 14;

/// A `YYYYMMDDHHMMSS` package version.
///
/// # Examples
///
/// ```
/// use flux_packager::version::PackageVersion;
///
/// let version = PackageVersion::try_from("20260215120000").expect("valid version");
/// assert_eq!(version.to_string(), "20260215120000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Derive a version from the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Derive a version from an arbitrary timestamp, truncating to seconds.
    #[must_use]
    pub fn from_datetime<Tz>(timestamp: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(timestamp.format(VERSION_FORMAT).to_string())
    }

    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PackageVersion {
    type Error = IdentityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let reject = |reason: &str| IdentityError::InvalidVersion {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };
        if value.len() != VERSION_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(reject("expected 14 digits in YYYYMMDDHHMMSS form"));
        }
        NaiveDateTime::parse_from_str(value, VERSION_FORMAT)
            .map_err(|_| reject("not a valid calendar date and time"))?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
