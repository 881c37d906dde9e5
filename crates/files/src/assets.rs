//! Assets-directory scoped image loading
//!
//! [`AssetService`] is bound to one assets directory (normally the directory holding
//! `result.json`). It reads image files, identifies their media type and produces
//! [`ImageAsset`] values carrying a ready-to-embed `data:` URI.
//!
//! # Path handling
//!
//! Crop paths in `result.json` are absolute paths on whatever machine ran the detector. Only the
//! final path segment is used, and it is looked up inside the assets directory:
//!
//! ```text
//! /srv/pipeline/run-17/crops/tooth_8.png  ->  <assets_dir>/tooth_8.png
//! C:\pipeline\crops\tooth_8.png           ->  <assets_dir>/tooth_8.png
//! ```
//!
//! Explicitly configured paths (logos, overview image) are used as given, so relative ones are
//! relative to the process working directory like any other path the user typed.

use crate::constants::{DEFAULT_MEDIA_TYPE, EXTENSION_MEDIA_TYPES};
use crate::FilesError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use report_types::NonEmptyText;
use std::fs;
use std::path::{Path, PathBuf};

/// An image read from disk and encoded for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// File name the bytes were read from
    pub original_filename: NonEmptyText,

    /// Detected media type (MIME type)
    ///
    /// Best-effort: content sniffing first, then the file extension, then `image/png`.
    pub media_type: &'static str,

    /// Size of the raw file in bytes
    pub size_bytes: u64,

    /// `data:<media_type>;base64,<payload>`
    pub data_uri: String,
}

impl ImageAsset {
    /// Builds an asset from bytes already in memory.
    ///
    /// `filename` is used for the extension fallback and for diagnostics.
    pub fn from_bytes(filename: &str, bytes: &[u8]) -> Result<Self, FilesError> {
        let original_filename = NonEmptyText::new(filename)
            .map_err(|_| FilesError::InvalidPath("asset file name is empty".into()))?;
        let media_type = detect_media_type(bytes, Path::new(filename));

        Ok(Self {
            original_filename,
            media_type,
            size_bytes: bytes.len() as u64,
            data_uri: format!("data:{};base64,{}", media_type, STANDARD.encode(bytes)),
        })
    }
}

/// Service for loading image assets from one directory
#[derive(Debug)]
pub struct AssetService {
    /// Canonicalised assets directory
    assets_dir: PathBuf,
}

impl AssetService {
    /// Creates a new `AssetService` for `assets_dir`
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidAssetsDirectory` if the directory does not exist, is not a
    /// directory, or cannot be canonicalised.
    pub fn new(assets_dir: &Path) -> Result<Self, FilesError> {
        if !assets_dir.exists() {
            return Err(FilesError::InvalidAssetsDirectory(format!(
                "Directory does not exist: {}",
                assets_dir.display()
            )));
        }

        if !assets_dir.is_dir() {
            return Err(FilesError::InvalidAssetsDirectory(format!(
                "Path is not a directory: {}",
                assets_dir.display()
            )));
        }

        let assets_dir = assets_dir.canonicalize().map_err(|e| {
            FilesError::InvalidAssetsDirectory(format!(
                "Cannot canonicalize path {}: {}",
                assets_dir.display(),
                e
            ))
        })?;

        Ok(Self { assets_dir })
    }

    /// Returns the canonicalised assets directory
    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Loads an explicitly configured image from `path` as given
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the file cannot be read, or `FilesError::InvalidPath` if it
    /// has no file name.
    pub fn load(&self, path: &Path) -> Result<ImageAsset, FilesError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                FilesError::InvalidPath(format!("No file name in {}", path.display()))
            })?
            .to_string();

        let bytes = fs::read(path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read asset {}: {}", path.display(), e),
            ))
        })?;

        let asset = ImageAsset::from_bytes(&filename, &bytes)?;
        tracing::debug!(
            "loaded asset {} ({} bytes, {})",
            path.display(),
            asset.size_bytes,
            asset.media_type
        );
        Ok(asset)
    }

    /// Loads a crop image recorded by the detection pipeline
    ///
    /// Only the last segment of `recorded_path` is used; see the module docs.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidPath` if the recorded path has no usable file name, or
    /// `FilesError::Io` if the resolved file cannot be read.
    pub fn load_crop(&self, recorded_path: &str) -> Result<ImageAsset, FilesError> {
        let path = self.resolve_crop_path(recorded_path)?;
        self.load(&path)
    }

    /// Resolves a recorded crop path to its location inside the assets directory
    pub fn resolve_crop_path(&self, recorded_path: &str) -> Result<PathBuf, FilesError> {
        let name = recorded_path
            .rsplit(['/', '\\'])
            .next()
            .map(str::trim)
            .unwrap_or_default();

        if name.is_empty() || name == "." || name == ".." {
            return Err(FilesError::InvalidPath(format!(
                "No file name in crop path {recorded_path:?}"
            )));
        }

        Ok(self.assets_dir.join(name))
    }

    /// [`Self::load`], logging and discarding failures
    pub fn try_load(&self, path: &Path) -> Option<ImageAsset> {
        match self.load(path) {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::warn!("skipping image {}: {}", path.display(), e);
                None
            }
        }
    }

    /// [`Self::load_crop`], logging and discarding failures
    pub fn try_load_crop(&self, recorded_path: &str) -> Option<ImageAsset> {
        match self.load_crop(recorded_path) {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::warn!("skipping crop {}: {}", recorded_path, e);
                None
            }
        }
    }
}

/// Sniffs the media type of `bytes`, falling back to the extension of `path`
fn detect_media_type(bytes: &[u8], path: &Path) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        if kind.matcher_type() == infer::MatcherType::Image {
            return kind.mime_type();
        }
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    extension
        .and_then(|ext| {
            EXTENSION_MEDIA_TYPES
                .iter()
                .find(|(candidate, _)| *candidate == ext)
                .map(|(_, media_type)| *media_type)
        })
        .unwrap_or(DEFAULT_MEDIA_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_asset_service_new_success() {
        let temp = TempDir::new().unwrap();
        let service = AssetService::new(temp.path()).unwrap();
        assert_eq!(service.assets_dir(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_asset_service_dir_not_exists() {
        let temp = TempDir::new().unwrap();
        let result = AssetService::new(&temp.path().join("missing"));
        assert!(matches!(result, Err(FilesError::InvalidAssetsDirectory(_))));
    }

    #[test]
    fn test_asset_service_dir_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("result.json");
        fs::write(&file, "{}").unwrap();
        let result = AssetService::new(&file);
        assert!(matches!(result, Err(FilesError::InvalidAssetsDirectory(_))));
    }

    #[test]
    fn test_load_png_builds_data_uri() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("logo.png"), PNG_HEADER).unwrap();

        let service = AssetService::new(temp.path()).unwrap();
        let asset = service.load(&temp.path().join("logo.png")).unwrap();

        assert_eq!(asset.media_type, "image/png");
        assert_eq!(asset.size_bytes, 8);
        assert_eq!(asset.original_filename.as_str(), "logo.png");
        assert_eq!(asset.data_uri, "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_content_wins_over_extension() {
        let asset = ImageAsset::from_bytes("photo.png", &JPEG_HEADER).unwrap();
        assert_eq!(asset.media_type, "image/jpeg");
        assert!(asset.data_uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_extension_fallback() {
        let asset = ImageAsset::from_bytes("scan.JPEG", b"not an image").unwrap();
        assert_eq!(asset.media_type, "image/jpeg");

        let asset = ImageAsset::from_bytes("scan.bmpx", b"not an image").unwrap();
        assert_eq!(asset.media_type, DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_load_absolute_path() {
        let assets = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let logo = elsewhere.path().join("brand.png");
        fs::write(&logo, PNG_HEADER).unwrap();

        let service = AssetService::new(assets.path()).unwrap();
        assert!(service.load(&logo).is_ok());
    }

    #[test]
    fn test_relative_path_is_relative_to_working_dir() {
        let assets = TempDir::new().unwrap();
        let local = TempDir::new_in(".").unwrap();
        fs::write(local.path().join("brand.png"), PNG_HEADER).unwrap();
        fs::write(assets.path().join("brand.png"), JPEG_HEADER).unwrap();

        let relative = Path::new(local.path().file_name().unwrap()).join("brand.png");
        assert!(relative.is_relative());

        let service = AssetService::new(assets.path()).unwrap();
        let asset = service.load(&relative).unwrap();
        assert_eq!(asset.media_type, "image/png");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let service = AssetService::new(temp.path()).unwrap();

        let result = service.load(Path::new("nope.png"));
        assert!(matches!(result, Err(FilesError::Io(_))));
        assert!(service.try_load(Path::new("nope.png")).is_none());
    }

    #[test]
    fn test_crop_resolved_by_file_name() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tooth_8.png"), PNG_HEADER).unwrap();
        let service = AssetService::new(temp.path()).unwrap();

        let asset = service
            .load_crop("/srv/pipeline/run-17/crops/tooth_8.png")
            .unwrap();
        assert_eq!(asset.original_filename.as_str(), "tooth_8.png");

        let windows = service.resolve_crop_path(r"C:\pipeline\crops\tooth_8.png").unwrap();
        assert_eq!(windows, service.assets_dir().join("tooth_8.png"));
    }

    #[test]
    fn test_crop_cannot_escape_assets_dir() {
        let temp = TempDir::new().unwrap();
        let service = AssetService::new(temp.path()).unwrap();

        let resolved = service.resolve_crop_path("../../etc/passwd").unwrap();
        assert!(resolved.starts_with(service.assets_dir()));

        assert!(matches!(
            service.resolve_crop_path("crops/.."),
            Err(FilesError::InvalidPath(_))
        ));
        assert!(matches!(
            service.resolve_crop_path("crops/"),
            Err(FilesError::InvalidPath(_))
        ));
        assert!(service.try_load_crop("crops/").is_none());
    }
}
