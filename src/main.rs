//! propresize CLI - proportional batch image resizer
//!
//! Resizes the images of one directory into another, skipping anything that
//! does not already have the requested aspect ratio.

use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use propresize::processing::{supported_extensions, FilterType};
use propresize::{init_logging, EntryOutcome, JobConfig, ResizeError, RunSummary, Settings};

/// propresize - Proportional Batch Image Resizer
#[derive(Parser)]
#[command(
    name = "propresize",
    version,
    about = "Resize every image in a directory that already has the target aspect ratio",
    long_about = "propresize reads the jpg, gif and png files directly inside SOURCE, resizes \
                  those whose width:height ratio equals the target ratio, and writes them under \
                  their original names into DESTINATION. Other files are left untouched."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing the images
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Existing directory receiving the resized copies
    #[arg(value_name = "DESTINATION")]
    destination: Option<PathBuf>,

    /// Target width in pixels [default: 640]
    #[arg(short, long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Target height in pixels [default: 480]
    #[arg(short = 'H', long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Resampling filter [default: lanczos3]
    #[arg(short, long, value_enum, value_name = "FILTER")]
    filter: Option<CliFilter>,

    /// JPEG output quality (1-100) [default: 90]
    #[arg(short, long, value_name = "QUALITY", value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Settings file (.toml or .yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only; a requested --json report is still printed)
    #[arg(short = 'Q', long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Generate an example settings file
    ExampleConfig {
        /// Output file path (.toml or .yaml)
        #[arg(short, long, default_value = "propresize.toml")]
        output: PathBuf,
    },
    /// Validate a settings file
    CheckConfig {
        /// Settings file to validate
        file: PathBuf,
    },
}

/// CLI-compatible filter enum
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<CliFilter> for FilterType {
    fn from(filter: CliFilter) -> Self {
        match filter {
            CliFilter::Nearest => FilterType::Nearest,
            CliFilter::Triangle => FilterType::Triangle,
            CliFilter::CatmullRom => FilterType::CatmullRom,
            CliFilter::Gaussian => FilterType::Gaussian,
            CliFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        init_logging(if cli.quiet { "error" } else { "info" }, false);
        if let Err(e) = handle_subcommand(command) {
            eprintln!("{}: {:#}", style("Error").red().bold(), e);
            let code = e.downcast_ref::<ResizeError>().map_or(1, ResizeError::exit_code);
            process::exit(code);
        }
        return;
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    init_logging(log_level, settings.logging.json);

    let start_time = Instant::now();
    match run(settings, cli.quiet || cli.json) {
        Ok((config, summary)) => {
            if cli.json || !cli.quiet {
                print_summary(&config, &summary, start_time.elapsed(), cli.json);
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &ResizeError) -> ! {
    match e.file_path() {
        Some(path) => error!(path = %path.display(), "{}", e),
        None => error!("{}", e),
    }
    eprintln!("{}: {}", style("Error").red().bold(), e.user_message());
    process::exit(e.exit_code());
}

/// Handle subcommands
fn handle_subcommand(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::ExampleConfig { output } => generate_example_config(&output),
        Commands::CheckConfig { file } => check_config_file(&file),
    }
}

/// Merge the settings file (if any) with command-line overrides
fn load_settings(cli: &Cli) -> Result<Settings, ResizeError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    if let Some(source) = &cli.source {
        settings.job.source = Some(source.clone());
    }
    if let Some(destination) = &cli.destination {
        settings.job.destination = Some(destination.clone());
    }
    if let Some(width) = cli.width {
        settings.job.width = width;
    }
    if let Some(height) = cli.height {
        settings.job.height = height;
    }
    if let Some(filter) = cli.filter {
        settings.job.filter = filter.into();
    }
    if let Some(quality) = cli.quality {
        settings.job.quality = quality;
    }

    settings.validate()?;
    Ok(settings)
}

/// Build the job and run it, ticking a spinner per entry
fn run(settings: Settings, hide_progress: bool) -> Result<(JobConfig, RunSummary), ResizeError> {
    let job = settings.into_builder()?.build()?;

    let progress = if hide_progress {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} entries {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = job.run_with(|path, outcome| {
        if let Some(pb) = &progress {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if let EntryOutcome::Resized { .. } = outcome {
                pb.set_message(format!("resized {}", name));
            }
            pb.inc(1);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    result.map(|summary| (job.config().clone(), summary))
}

/// Generate example settings file
fn generate_example_config(output_path: &Path) -> anyhow::Result<()> {
    Settings::example()
        .to_file(output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "{}: Generated example settings: {}",
        style("Success").green().bold(),
        output_path.display()
    );
    Ok(())
}

/// Validate settings file
fn check_config_file(file_path: &Path) -> anyhow::Result<()> {
    let settings = Settings::from_file(file_path)
        .with_context(|| format!("loading {}", file_path.display()))?;
    settings.validate()?;

    info!("Validated settings file {:?}", file_path);
    println!("{}: Settings file is valid", style("Success").green().bold());
    println!(
        "Target: {}x{}, filter {:?}, quality {}",
        settings.job.width, settings.job.height, settings.job.filter, settings.job.quality
    );
    Ok(())
}

/// Print processing summary
fn print_summary(config: &JobConfig, summary: &RunSummary, duration: Duration, json_output: bool) {
    if json_output {
        let report = serde_json::json!({
            "config": config,
            "summary": summary,
            "duration_secs": duration.as_secs_f64(),
        });
        println!("{}", report);
        return;
    }

    println!();
    println!("{}", style("Processing Summary:").bold());
    println!("  {}: {}", style("Resized").green(), summary.resized);
    println!(
        "  {}: {} ({} not images, {} other ratio)",
        style("Skipped").yellow(),
        summary.not_images + summary.disproportional,
        summary.not_images,
        summary.disproportional
    );
    if summary.failed > 0 {
        println!("  {}: {}", style("Unreadable").red(), summary.failed);
    }
    if summary.not_images > 0 {
        println!(
            "  {}: {}",
            style("Image names end in").dim(),
            supported_extensions().join(", ")
        );
    }
    println!("  {}: {:.2}s", style("Duration").blue(), duration.as_secs_f64());
    println!(
        "  {}: {} -> {}",
        style("Target").cyan(),
        config.source().display(),
        config.destination().display()
    );
}
