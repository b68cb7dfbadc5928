//! CLI binary for passport-studio.
//!
//! A thin shim over the library crate that maps CLI flags to `ClientConfig`
//! and `InputCollector` calls and prints the outcome.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use passport_studio::{
    ClientConfig, CopyCount, InputCollector, ProgressCallback, SubmissionController,
    SubmissionProgressCallback, SubmissionState, DEFAULT_ENDPOINT,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

fn human_bytes(n: usize) -> String {
    if n >= 1024 * 1024 {
        format!("{:.1} MB", n as f64 / (1024.0 * 1024.0))
    } else if n >= 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{n} B")
    }
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner shown while the submission is in flight. The final
/// summary lines are printed by `main` after the state settles; the callback
/// only animates the wait and clears itself.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Processing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl SubmissionProgressCallback for CliProgressCallback {
    fn on_submission_start(&self, photo_bytes: usize) {
        self.bar
            .set_message(format!("uploading photo ({})…", human_bytes(photo_bytes)));
    }

    fn on_result_ready(&self, _archive_bytes: usize) {
        self.bar.finish_and_clear();
    }

    fn on_submission_failed(&self, _reason: &str) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Submit a photo with the defaults (white background, 6 copies)
  passport-studio me.jpg

  # Light-blue background, 3 copies, custom output path
  passport-studio --bg blue --copies 3 -o ~/Desktop/photos.zip me.jpg

  # Any background string is forwarded verbatim
  passport-studio --bg '#3b82f6' me.jpg

  # Point at a remote service
  passport-studio --endpoint https://studio.example.com/process me.jpg

  # Structured outcome for scripting
  passport-studio --json me.jpg > outcome.json

PRESET BACKGROUNDS:
  white   #ffffff   (default)
  blue    #3b82f6
  red     #ff0000
  Anything else is sent to the service unchanged; the service decides
  which encodings it accepts.

ARCHIVE CONTENTS (produced by the service):
  passport_single.jpg   the processed passport photo
  stamp_single.jpg      stamp-size variant
  layout_3.jpg          3-up print sheet
  layout_6.jpg          6-up print sheet
  a4_layout6.pdf        A4 sheet ready to print

ENVIRONMENT VARIABLES:
  PASSPORT_STUDIO_ENDPOINT   Processing endpoint URL
  PASSPORT_STUDIO_OUTPUT     Archive destination path
  PASSPORT_STUDIO_BG         Background color or preset name
  PASSPORT_STUDIO_COPIES     Copies per sheet (3 or 6)
  PASSPORT_STUDIO_TIMEOUT    Request timeout in seconds

SETUP:
  1. Start (or point at) a processing service:  --endpoint http://host:5000/process
  2. Submit:                                    passport-studio me.jpg
"#;

/// Submit a photo to a passport-photo processing service.
#[derive(Parser, Debug)]
#[command(
    name = "passport-studio",
    version,
    about = "Submit a photo to a passport-photo processing service and download the print-ready archive",
    long_about = "Upload a photo together with background-color and copy-count options to a \
passport-photo processing service. The service removes the background, crops and normalises \
the photo, and returns a ZIP archive with print-ready layouts, saved locally as \
processed_photos.zip (or wherever --output points).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the photo to submit.
    photo: PathBuf,

    /// Write the result archive to this path.
    #[arg(
        short,
        long,
        env = "PASSPORT_STUDIO_OUTPUT",
        default_value = "processed_photos.zip"
    )]
    output: PathBuf,

    /// Background color: white, blue, red, or any literal string (e.g. '#3b82f6').
    #[arg(long = "bg", env = "PASSPORT_STUDIO_BG", default_value = "white")]
    bg_color: String,

    /// Copies per printed sheet.
    #[arg(long, env = "PASSPORT_STUDIO_COPIES", value_enum, default_value = "6")]
    copies: CopiesArg,

    /// Processing endpoint URL.
    #[arg(long, env = "PASSPORT_STUDIO_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "PASSPORT_STUDIO_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print a structured JSON outcome on stdout.
    #[arg(long, env = "PASSPORT_STUDIO_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "PASSPORT_STUDIO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PASSPORT_STUDIO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PASSPORT_STUDIO_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CopiesArg {
    #[value(name = "3")]
    Three,
    #[value(name = "6")]
    Six,
}

impl From<CopiesArg> for CopyCount {
    fn from(v: CopiesArg) -> Self {
        match v {
            CopiesArg::Three => CopyCount::Three,
            CopiesArg::Six => CopyCount::Six,
        }
    }
}

/// Map the preset names the UI traditionally offered onto their hex values;
/// anything else is forwarded verbatim.
fn resolve_bg(value: &str) -> String {
    match value.to_lowercase().as_str() {
        "white" => "#ffffff".to_string(),
        "blue" | "light-blue" => "#3b82f6".to_string(),
        "red" => "#ff0000".to_string(),
        _ => value.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner owns the terminal;
    // it provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Collect input ────────────────────────────────────────────────────
    let mut collector = InputCollector::new();
    collector
        .select_photo_from_path(&cli.photo)
        .context("Failed to load photo")?;
    collector.set_background_color(resolve_bg(&cli.bg_color));
    collector.set_copy_count(cli.copies.into());

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ClientConfig::builder()
        .endpoint(&cli.endpoint)
        .request_timeout_secs(cli.timeout);

    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Submit ───────────────────────────────────────────────────────────
    let mut controller =
        SubmissionController::new(config).context("Failed to initialise the client")?;
    controller.submit(&collector).await?;

    // ── Report outcome ───────────────────────────────────────────────────
    match controller.state() {
        SubmissionState::Ready(archive) => {
            let archive_bytes = archive.len();
            archive
                .persist_to(&cli.output)
                .await
                .context("Failed to save the archive")?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "status": "ready",
                        "archive_bytes": archive_bytes,
                        "output": cli.output,
                    }))
                    .context("Failed to serialise outcome")?
                );
            } else if !cli.quiet {
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&cli.output.display().to_string()),
                    dim(&human_bytes(archive_bytes)),
                );
            }
            Ok(())
        }
        SubmissionState::Failed(reason) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "status": "failed",
                        "reason": reason,
                    }))
                    .context("Failed to serialise outcome")?
                );
            }
            if !cli.quiet {
                eprintln!("{} {}", red("✘"), reason);
            }
            std::process::exit(1);
        }
        state => anyhow::bail!("Submission ended in unexpected state '{}'", state.label()),
    }
}
