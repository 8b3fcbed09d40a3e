//! Configuration management for propresize

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ResizeError};
use crate::processing::{FilterType, ResizeJob};

pub mod settings;
pub use settings::*;

/// Target width used when none is given
pub const DEFAULT_WIDTH: u32 = 640;
/// Target height used when none is given
pub const DEFAULT_HEIGHT: u32 = 480;
/// JPEG encoder quality used when none is given
pub const DEFAULT_QUALITY: u8 = 90;

/// Immutable settings for one resize job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    source: PathBuf,
    destination: PathBuf,
    width: u32,
    height: u32,
    filter: FilterType,
    quality: u8,
}

impl JobConfig {
    /// Start building a job from its mandatory directories
    pub fn builder<S, D>(source: S, destination: D) -> JobConfigBuilder
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        JobConfigBuilder::new(source, destination)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

/// Fluent builder for [`ResizeJob`]
///
/// Width and height default to 640x480 when not set.
#[derive(Debug, Clone)]
pub struct JobConfigBuilder {
    source: PathBuf,
    destination: PathBuf,
    width: u32,
    height: u32,
    filter: FilterType,
    quality: u8,
}

impl JobConfigBuilder {
    pub fn new<S, D>(source: S, destination: D) -> Self
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self {
            source: source.into(),
            destination: destination.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            filter: FilterType::default(),
            quality: DEFAULT_QUALITY,
        }
    }

    /// Set the target width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the target height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the resampling filter
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Set the JPEG output quality (1-100)
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Validate the configuration and create the job.
    ///
    /// Fails with `SourceMissing` if the source path does not exist. The
    /// destination is only checked when images are written.
    pub fn build(self) -> Result<ResizeJob> {
        if !self.source.exists() {
            return Err(ResizeError::source_missing(self.source));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ResizeError::config(format!(
                "Width and height must be greater than 0, got {}x{}",
                self.width, self.height
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ResizeError::config(format!(
                "Quality must be between 1-100, got {}",
                self.quality
            )));
        }

        let config = JobConfig {
            source: self.source,
            destination: self.destination,
            width: self.width,
            height: self.height,
            filter: self.filter,
            quality: self.quality,
        };
        debug!("Built job configuration: {:?}", config);

        Ok(ResizeJob::new(config))
    }
}
