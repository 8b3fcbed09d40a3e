//! Error types and handling for propresize

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for propresize operations
pub type Result<T> = std::result::Result<T, ResizeError>;

/// Main error type for propresize operations
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The configured source directory does not exist
    #[error("source.do.not.exist: {path:?}")]
    SourceMissing { path: PathBuf },

    /// Caller passed an empty path where one is required
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration values are unusable
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A file could not be decoded as the format its name implies
    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing a resized image to the destination failed
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Enumerating the source directory failed
    #[error("Failed to read directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerdeError(String),
}

impl ResizeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new source missing error
    pub fn source_missing(path: PathBuf) -> Self {
        Self::SourceMissing { path }
    }

    /// Create a new decode error
    pub fn decode(path: PathBuf, source: image::ImageError) -> Self {
        Self::Decode { path, source }
    }

    /// Create a new write error
    pub fn write(path: PathBuf, source: image::ImageError) -> Self {
        Self::Write { path, source }
    }

    /// Check if this error only affects a single entry (the run can continue)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Decode { .. } => true,

            // Shared resources: the directory stream and the destination
            Self::DirectoryRead { .. }
            | Self::IoError(_)
            | Self::Write { .. } => false,

            Self::SourceMissing { .. }
            | Self::InvalidArgument { .. }
            | Self::ConfigError { .. }
            | Self::SerdeError(_) => false,
        }
    }

    /// Whether this error stems from configuration rather than processing
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing { .. } | Self::ConfigError { .. } | Self::SerdeError(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            2
        } else {
            1
        }
    }

    /// Get the associated file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::SourceMissing { path }
            | Self::Decode { path, .. }
            | Self::Write { path, .. }
            | Self::DirectoryRead { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceMissing { path } => {
                format!("Source directory does not exist: {}", path.display())
            }
            Self::Decode { path, source } => {
                format!("{} is not a readable image: {}", path.display(), source)
            }
            Self::Write { path, source } => {
                format!(
                    "Could not write {} (does the destination directory exist?): {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryRead { path, source } => {
                format!("Could not list {}: {}", path.display(), source)
            }
            Self::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }
}

// Convert serde errors to our error type
impl From<toml::de::Error> for ResizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::SerdeError(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for ResizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerdeError(format!("YAML parsing error: {}", err))
    }
}
