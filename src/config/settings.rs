//! Settings files describing a job and its logging

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::config::{JobConfigBuilder, DEFAULT_HEIGHT, DEFAULT_QUALITY, DEFAULT_WIDTH};
use crate::error::{Result, ResizeError};
use crate::processing::FilterType;

/// Contents of a `.toml` or `.yaml` settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Job parameters
    pub job: JobSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Job parameters; directories may be supplied on the command line instead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
    pub quality: u8,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            filter: FilterType::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON logging
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
}

fn file_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => Ok(FileFormat::Toml),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        _ => Err(ResizeError::config(
            "Unsupported settings file format. Use .toml or .yaml",
        )),
    }
}

impl Settings {
    /// Load settings from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResizeError::config(format!("Failed to read settings file {:?}: {}", path, e))
        })?;

        match format {
            FileFormat::Toml => toml::from_str(&content).map_err(Into::into),
            FileFormat::Yaml => serde_yaml::from_str(&content).map_err(Into::into),
        }
    }

    /// Save settings to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match file_format(path)? {
            FileFormat::Toml => toml::to_string_pretty(self).map_err(|e| {
                ResizeError::config(format!("TOML serialization failed: {}", e))
            })?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            ResizeError::config(format!("Failed to write settings file {:?}: {}", path, e))
        })
    }

    /// Settings written by `example-config`
    pub fn example() -> Self {
        Self {
            job: JobSettings {
                source: Some(PathBuf::from("images")),
                destination: Some(PathBuf::from("resized")),
                ..JobSettings::default()
            },
            logging: LoggingSettings::default(),
        }
    }

    /// Validate values that do not depend on the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.job.width == 0 || self.job.height == 0 {
            return Err(ResizeError::config(format!(
                "Width and height must be greater than 0, got {}x{}",
                self.job.width, self.job.height
            )));
        }
        if self.job.quality == 0 || self.job.quality > 100 {
            return Err(ResizeError::config(format!(
                "Quality must be between 1-100, got {}",
                self.job.quality
            )));
        }
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(ResizeError::config(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Turn these settings into a job builder.
    ///
    /// Both directories must be present.
    pub fn into_builder(self) -> Result<JobConfigBuilder> {
        let source = self
            .job
            .source
            .ok_or_else(|| ResizeError::config("No source directory given"))?;
        let destination = self
            .job
            .destination
            .ok_or_else(|| ResizeError::config("No destination directory given"))?;

        Ok(JobConfigBuilder::new(source, destination)
            .with_width(self.job.width)
            .with_height(self.job.height)
            .with_filter(self.job.filter)
            .with_quality(self.job.quality))
    }
}
