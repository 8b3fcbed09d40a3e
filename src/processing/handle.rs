//! A single decoded image tied to its source path

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tracing::debug;

use crate::error::{Result, ResizeError};
use crate::processing::formats::ImageFormat;
use crate::processing::resize::{resize_exact, same_ratio, FilterType};

/// One decoded image and the path it was read from.
///
/// Handles are never mutated: `resize` returns a new handle that keeps the
/// original path so `write` can reuse its file name.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    path: PathBuf,
    image: DynamicImage,
}

impl ImageHandle {
    /// Decode the image at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading image: {:?}", path);

        let image = image::open(path).map_err(|e| ResizeError::decode(path.to_path_buf(), e))?;

        debug!("Loaded image: {}x{}", image.width(), image.height());
        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when the image already has the target aspect ratio
    pub fn is_proportional(&self, target_width: u32, target_height: u32) -> bool {
        same_ratio(self.width(), self.height(), target_width, target_height)
    }

    /// Resample to exactly `width` x `height`
    pub fn resize(&self, width: u32, height: u32, filter: FilterType) -> ImageHandle {
        Self {
            path: self.path.clone(),
            image: resize_exact(&self.image, width, height, filter),
        }
    }

    /// Write the pixels into `destination` under the original file name.
    ///
    /// The encoder follows the original extension. `quality` only applies
    /// to JPEG. The destination directory is never created.
    pub fn write<P: AsRef<Path>>(&self, destination: P, quality: u8) -> Result<PathBuf> {
        let file_name = self.path.file_name().ok_or_else(|| {
            ResizeError::invalid_argument(format!("{:?} has no file name", self.path))
        })?;
        let output_path = destination.as_ref().join(file_name);

        let format = ImageFormat::from_path(&self.path)?.ok_or_else(|| {
            ResizeError::invalid_argument(format!("{:?} is not a supported image", self.path))
        })?;

        debug!("Saving image: {:?} as {:?}", output_path, format);

        match format {
            ImageFormat::Jpeg => {
                let file = File::create(&output_path)
                    .map_err(|e| ResizeError::write(output_path.clone(), e.into()))?;
                let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
                encoder
                    .encode_image(&self.image.to_rgb8())
                    .map_err(|e| ResizeError::write(output_path.clone(), e))?;
            }
            ImageFormat::Png | ImageFormat::Gif => {
                self.image
                    .save_with_format(&output_path, format.into())
                    .map_err(|e| ResizeError::write(output_path.clone(), e))?;
            }
        }

        Ok(output_path)
    }
}
