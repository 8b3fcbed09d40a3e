//! Resampling filters and aspect-ratio arithmetic

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Available resize filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    /// Nearest neighbor (fastest, lowest quality)
    Nearest,
    /// Triangle (linear interpolation)
    Triangle,
    /// Catmull-Rom cubic spline
    CatmullRom,
    /// Gaussian blur
    Gaussian,
    /// Lanczos with radius 3 (high quality, recommended)
    #[default]
    Lanczos3,
}

impl From<FilterType> for image::imageops::FilterType {
    fn from(filter: FilterType) -> Self {
        match filter {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Triangle => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Gaussian => image::imageops::FilterType::Gaussian,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Returns true when `width:height` equals `target_width:target_height`.
///
/// Compared by cross-multiplication so the check is exact. A zero on
/// either side never matches.
pub fn same_ratio(width: u32, height: u32, target_width: u32, target_height: u32) -> bool {
    if width == 0 || height == 0 || target_width == 0 || target_height == 0 {
        return false;
    }
    u64::from(width) * u64::from(target_height) == u64::from(height) * u64::from(target_width)
}

/// Resample to exactly `width` x `height`, returning a new image
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32, filter: FilterType) -> DynamicImage {
    debug!(
        "Resizing {}x{} -> {}x{} using {:?}",
        image.width(),
        image.height(),
        width,
        height,
        filter
    );

    // Same dimensions, no resampling needed
    if image.width() == width && image.height() == height {
        return image.clone();
    }

    image.resize_exact(width, height, filter.into())
}
