//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup (from flags or environment variables) and
//! then passed into [`crate::ReportService`]. Library code never reads the environment itself.
//!
//! Paths given to the `with_*` methods are used as given: relative ones are relative to the
//! process working directory. Defaults are built from the canonicalised assets directory, so they
//! do not depend on the working directory at all.

use crate::constants::{DEFAULT_FINDINGS_FILENAME, DEFAULT_OVERVIEW_FILENAME, DEFAULT_REPORT_FILENAME};
use crate::{ReportError, ReportResult};
use findings::ParseMode;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    findings_path: PathBuf,
    assets_dir: PathBuf,
    output_path: PathBuf,
    cover_logo: Option<PathBuf>,
    header_logo: Option<PathBuf>,
    overview_image: Option<PathBuf>,
    parse_mode: ParseMode,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at `assets_dir`.
    ///
    /// The findings file, output file and overview image default to their usual names inside
    /// `assets_dir`; override them with the `with_*` methods.
    pub fn new(assets_dir: PathBuf, parse_mode: ParseMode) -> ReportResult<Self> {
        if !assets_dir.is_dir() {
            return Err(ReportError::InvalidInput(format!(
                "assets directory does not exist or is not a directory: {}",
                assets_dir.display()
            )));
        }
        let assets_dir = assets_dir.canonicalize().map_err(|e| {
            ReportError::InvalidInput(format!(
                "cannot canonicalize assets directory {}: {}",
                assets_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            findings_path: assets_dir.join(DEFAULT_FINDINGS_FILENAME),
            output_path: assets_dir.join(DEFAULT_REPORT_FILENAME),
            overview_image: Some(assets_dir.join(DEFAULT_OVERVIEW_FILENAME)),
            cover_logo: None,
            header_logo: None,
            assets_dir,
            parse_mode,
        })
    }

    pub fn with_findings_path(mut self, path: PathBuf) -> Self {
        self.findings_path = path;
        self
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = path;
        self
    }

    pub fn with_cover_logo(mut self, path: Option<PathBuf>) -> Self {
        self.cover_logo = path;
        self
    }

    pub fn with_header_logo(mut self, path: Option<PathBuf>) -> Self {
        self.header_logo = path;
        self
    }

    /// `None` leaves the overview section out of the report.
    pub fn with_overview_image(mut self, path: Option<PathBuf>) -> Self {
        self.overview_image = path;
        self
    }

    pub fn findings_path(&self) -> &Path {
        &self.findings_path
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn cover_logo(&self) -> Option<&Path> {
        self.cover_logo.as_deref()
    }

    pub fn header_logo(&self) -> Option<&Path> {
        self.header_logo.as_deref()
    }

    pub fn overview_image(&self) -> Option<&Path> {
        self.overview_image.as_deref()
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }
}
