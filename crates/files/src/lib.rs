//! Report asset loading
//!
//! This crate loads the image assets referenced by a report (logos, the overview photograph and
//! per-tooth crops) and turns them into inline `data:` URIs so the generated HTML is a single
//! self-contained file.
//!
//! ## Design Principles
//!
//! - Assets are read-only inputs; nothing is written back
//! - Crop paths recorded by the detection pipeline are resolved by file name only, inside the
//!   configured assets directory
//! - Media types are sniffed from content first and the file extension second
//!
//! ## Example Usage
//!
//! ```no_run
//! use oral_files::AssetService;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AssetService::new(Path::new("run-17"))?;
//! let crop = service.load_crop("/tmp/pipeline/crops/tooth_8.png")?;
//! println!("{} bytes as {}", crop.size_bytes, crop.media_type);
//! # Ok(())
//! # }
//! ```

mod assets;
mod constants;

pub use assets::{AssetService, ImageAsset};
pub use constants::{DEFAULT_MEDIA_TYPE, EXTENSION_MEDIA_TYPES};

/// Errors that can occur while loading assets
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Assets directory does not exist or is not a directory
    #[error("Invalid assets directory: {0}")]
    InvalidAssetsDirectory(String),

    /// Path validation failed (no usable file name, or escapes the assets directory)
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
