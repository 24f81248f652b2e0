//! Photo loading for analysis requests
//!
//! This module resolves request image paths against the photo root and
//! decodes them into RGB pixel buffers.
//!
//! ## Supported Formats
//!
//! Everything the `image` crate decodes with its default features:
//! - JPEG, PNG, GIF, WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI, DDS, HDR
//!
//! ## Design
//!
//! All photos are converted to 8-bit RGB so region extraction sees the same
//! channel order regardless of the source format.

use std::path::{Path, PathBuf};

use image::{ImageReader, RgbImage};

use crate::error::{AnalysisError, Result};

/// Resolve a request path: relative paths live under `photo_root`
pub fn resolve_image_path(photo_root: &Path, image_path: &Path) -> PathBuf {
    if image_path.is_absolute() {
        image_path.to_path_buf()
    } else {
        photo_root.join(image_path)
    }
}

/// Load a photo from disk as 8-bit RGB
///
/// # Errors
///
/// Returns `AnalysisError::ImageNotFound` if the file does not exist and
/// `AnalysisError::ImageLoadError` if it cannot be opened or decoded.
///
/// # Example
///
/// ```rust,no_run
/// use aquarium_analyzer::image_loader::load_image;
/// use std::path::Path;
///
/// let img = load_image(Path::new("strip.jpg"))?;
/// println!("Loaded image: {}x{}", img.width(), img.height());
/// # Ok::<(), aquarium_analyzer::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.is_file() {
        return Err(AnalysisError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    // Content sniffing handles photos saved with a misleading extension
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| {
            AnalysisError::image_load(
                format!("Failed to open image file: {}", path.display()),
                e,
            )
        })?;

    let img = reader.decode().map_err(|e| {
        AnalysisError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
