//! Core image processing functionality

use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::JobConfig;
use crate::error::{Result, ResizeError};

pub mod formats;
pub mod handle;
pub mod resize;

pub use formats::*;
pub use handle::*;
pub use resize::*;

/// What happened to a single directory entry during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Not a supported image name, never opened
    NotImage,
    /// Decoded, but its ratio differs from the target
    Disproportional { width: u32, height: u32 },
    /// Could not be inspected or decoded; the run moved on
    Failed { reason: String },
    /// Resized and written to `output`
    Resized { output: PathBuf },
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scanned: u64,
    pub not_images: u64,
    pub disproportional: u64,
    pub failed: u64,
    pub resized: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &EntryOutcome) {
        self.scanned += 1;
        match outcome {
            EntryOutcome::NotImage => self.not_images += 1,
            EntryOutcome::Disproportional { .. } => self.disproportional += 1,
            EntryOutcome::Failed { .. } => self.failed += 1,
            EntryOutcome::Resized { .. } => self.resized += 1,
        }
    }
}

/// One configured resize run over a source directory.
///
/// Built through [`JobConfig::builder`], which checks that the source
/// exists. A job holds no state between runs.
#[derive(Debug)]
pub struct ResizeJob {
    config: JobConfig,
}

impl ResizeJob {
    pub(crate) fn new(config: JobConfig) -> Self {
        Self { config }
    }

    /// The configuration this job was built from
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Process every direct entry of the source directory
    pub fn run(&self) -> Result<RunSummary> {
        self.run_with(|_, _| {})
    }

    /// Like [`run`](Self::run), calling `observer` after each entry.
    ///
    /// Directory stream errors and destination write errors abort the run.
    /// Entries that cannot be inspected or decoded are logged and skipped.
    /// Symlinks are not followed while listing; `ImageHandle::open` resolves
    /// them when reading.
    pub fn run_with<F>(&self, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&Path, &EntryOutcome),
    {
        let config = &self.config;
        info!(
            "Resizing images from {:?} into {:?} at {}x{}",
            config.source(),
            config.destination(),
            config.width(),
            config.height()
        );

        let metadata = std::fs::metadata(config.source())?;
        if !metadata.is_dir() {
            return Err(ResizeError::IoError(std::io::Error::other(format!(
                "{} is not a directory",
                config.source().display()
            ))));
        }

        let mut summary = RunSummary::default();

        // The iterator owns the open directory handle; dropping it on any
        // return closes the stream.
        let entries = WalkDir::new(config.source()).min_depth(1).max_depth(1);

        for entry in entries {
            let (path, outcome) = match entry {
                Ok(entry) => {
                    let outcome = self.process_entry(entry.path())?;
                    (entry.into_path(), outcome)
                }
                Err(e) => entry_failure(config.source(), e)?,
            };
            debug!("{:?}: {:?}", path, outcome);

            summary.record(&outcome);
            observer(&path, &outcome);
        }

        info!(
            "Run complete: {} resized, {} skipped, {} failed",
            summary.resized,
            summary.not_images + summary.disproportional,
            summary.failed
        );
        Ok(summary)
    }

    fn process_entry(&self, path: &Path) -> Result<EntryOutcome> {
        let config = &self.config;

        if !is_image(path)? {
            return Ok(EntryOutcome::NotImage);
        }

        let handle = match ImageHandle::open(path) {
            Ok(handle) => handle,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping {}", e.user_message());
                return Ok(EntryOutcome::Failed {
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        if !handle.is_proportional(config.width(), config.height()) {
            debug!(
                "Skipping {:?}: {}x{} does not match {}x{}",
                path,
                handle.width(),
                handle.height(),
                config.width(),
                config.height()
            );
            return Ok(EntryOutcome::Disproportional {
                width: handle.width(),
                height: handle.height(),
            });
        }

        let output = handle
            .resize(config.width(), config.height(), config.filter())
            .write(config.destination(), config.quality())?;

        Ok(EntryOutcome::Resized { output })
    }
}

/// Classify a walk error as belonging to one entry or to the stream.
///
/// Errors tied to a path below the root concern a single entry and are
/// reported as `Failed`. Anything else means the listing itself broke.
fn entry_failure(source: &Path, error: walkdir::Error) -> Result<(PathBuf, EntryOutcome)> {
    let entry_path = match error.path() {
        Some(path) if error.depth() >= 1 => Some(path.to_path_buf()),
        _ => None,
    };

    match entry_path {
        Some(path) => {
            warn!("Skipping {}: {}", path.display(), error);
            let reason = error.to_string();
            Ok((path, EntryOutcome::Failed { reason }))
        }
        None => Err(ResizeError::DirectoryRead {
            path: source.to_path_buf(),
            source: error,
        }),
    }
}
