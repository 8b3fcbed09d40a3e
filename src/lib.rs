//! propresize - proportional batch image resizer
//!
//! Resizes every image in a directory that already has the target aspect
//! ratio and writes the copies, under their original names, into another
//! directory. Images with a different ratio are left alone: nothing is
//! cropped, padded or stretched.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use propresize::JobConfig;
//!
//! let job = JobConfig::builder("photos", "photos-small")
//!     .with_width(320)
//!     .with_height(240)
//!     .build()?;
//!
//! let summary = job.run()?;
//! println!("resized {} of {} entries", summary.resized, summary.scanned);
//! # Ok::<(), propresize::ResizeError>(())
//! ```
//!
//! Only `jpg`, `gif` and `png` files are considered, in all-lowercase or
//! all-uppercase spelling.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod processing;

// Re-export commonly used types
pub use config::{JobConfig, JobConfigBuilder, Settings};
pub use error::{Result, ResizeError};
pub use processing::{get_extension, is_image, EntryOutcome, ImageHandle, ResizeJob, RunSummary};

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Returns false if a global
/// subscriber was already installed.
pub fn init_logging(level: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.finish()).is_ok()
    };

    if installed {
        info!("propresize v{} initialized", VERSION);
    }
    installed
}
