//! Image format detection by file name

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Result, ResizeError};

/// Image formats recognised in the source directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Map an extension to a format.
    ///
    /// Matching is literal: only the all-lowercase and all-uppercase
    /// spellings are accepted, so `Jpg` or `jpeg` yield `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" | "JPG" => Some(Self::Jpeg),
            "gif" | "GIF" => Some(Self::Gif),
            "png" | "PNG" => Some(Self::Png),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        Ok(Self::from_extension(&get_extension(path)?))
    }
}

/// Convert our ImageFormat to image crate format
impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Extensions accepted as images, in every accepted casing
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "JPG", "gif", "GIF", "png", "PNG"]
}

/// Returns true if the path names a supported image.
///
/// Fails with `InvalidArgument` for an empty path.
pub fn is_image<P: AsRef<Path>>(path: P) -> Result<bool> {
    Ok(ImageFormat::from_path(path)?.is_some())
}

/// Returns everything after the last `.` of the path's textual form, or an
/// empty string when there is no `.` at all.
///
/// The whole path is searched, not only the file name, so `a.d/file`
/// yields `d/file`.
pub fn get_extension<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ResizeError::invalid_argument("path must not be empty"));
    }

    let text = path.to_string_lossy();
    Ok(match text.rfind('.') {
        Some(index) => text[index + 1..].to_string(),
        None => String::new(),
    })
}
