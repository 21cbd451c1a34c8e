//! Flux packager library.
//!
//! Fabricates a placeholder package artefact for the Flux package manager:
//! a scratch directory holding a single payload file is archived with `tar`,
//! compressed with Zstandard, and hashed with SHA-256 so the result can be
//! pasted into a `packages.json` manifest by hand. Scratch artefacts are
//! always removed; only the `.tar.zst` survives a run.
//!
//! # Modules
//!
//! - [`archive`] - Tar construction and atomic Zstandard compression
//! - [`checksum`] - SHA-256 digest of the finished archive
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Packaging configuration and TOML loading
//! - [`error`] - Typed failure categories for packaging and cleanup
//! - [`manifest`] - Manifest entry emitted for `packages.json`
//! - [`naming`] - File names derived from package identity
//! - [`output`] - Progress and result reporting
//! - [`package_name`] - Validated package name newtype
//! - [`pipeline`] - The packaging run with guaranteed cleanup
//! - [`scratch`] - Scratch directory creation and removal
//! - [`sha256_digest`] - Validated SHA-256 hex digest newtype
//! - [`version`] - Timestamp-derived package version

pub mod archive;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod package_name;
pub mod pipeline;
pub mod scratch;
pub mod sha256_digest;
pub mod version;
