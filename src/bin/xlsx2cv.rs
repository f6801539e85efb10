//! CLI binary for xlsx2cv.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `BatchConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use xlsx2cv::{convert_batch, BatchConfig, BatchProgressCallback, ProgressCallback};

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
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-row log
/// lines using [indicatif].
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-row wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
    /// Count of rows that errored out.
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set by
    /// `on_batch_start` (called before any rows are processed).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening workbook…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} rows  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Generating");
        self.bar.reset_eta();
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_rows: usize) {
        self.activate_bar(total_rows);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Generating CVs for {total_rows} rows…"))
        ));
    }

    fn on_row_start(&self, row_num: usize, _total: usize) {
        self.start_times
            .lock()
            .unwrap()
            .insert(row_num, Instant::now());
        self.bar.set_message(format!("row {row_num}"));
    }

    fn on_row_complete(&self, row_num: usize, total: usize, output_path: &Path) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(&row_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        let file = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| output_path.display().to_string());

        self.bar.println(format!(
            "  {} Row {:>3}/{:<3}  {:<40}  {}",
            green("✓"),
            row_num,
            total,
            file,
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_row_error(&self, row_num: usize, total: usize, error: &str) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(&row_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = truncate_message(error, 79);

        self.bar.println(format!(
            "  {} Row {:>3}/{:<3}  {}  {}",
            red("✗"),
            row_num,
            total,
            red(&msg),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_rows: usize, generated: usize) {
        let failed = total_rows.saturating_sub(generated);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} CVs generated successfully",
                green("✔"),
                bold(&generated.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} CVs generated  ({} failed)",
                if failed == total_rows {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&generated.to_string()),
                total_rows,
                red(&failed.to_string()),
            );
        }
    }
}

/// Cap `s` at `max_chars` characters, appending an ellipsis when cut.
/// Counts chars, not bytes — messages embed arbitrary names and paths.
fn truncate_message(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\u{2026}", &s[..idx]),
        None => s.to_string(),
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic run: input.xlsx in the current directory, PDFs in output_cvs/
  xlsx2cv

  # Explicit workbook and output directory
  xlsx2cv people.xlsx -o cvs/

  # Pick a sheet by name (default: first sheet)
  xlsx2cv people.xlsx --sheet "Candidates"

  # Use different fonts
  xlsx2cv --font-regular assets/Inter.ttf --font-bold assets/Inter-Bold.ttf

  # Abort on the first bad row instead of skipping it
  xlsx2cv people.xlsx --fail-fast

  # Structured JSON report (per-row results + stats) on stdout
  xlsx2cv people.xlsx --json > report.json

EXPECTED COLUMNS:
  One row per person. Scalar columns: First Name, Middle Name, Last Name,
  Email, Phone Number, Address, LinkedIn Profile, Date of Birth, Summary,
  "Skills and Tools", Languages, and friends. Repeated blocks use the
  numbered-suffix convention: Company, Company2 … Company5 (work
  experience, 5 blocks), Level of Education … (education, 5 blocks),
  Award / Certificate Name … (awards, 2 blocks). Some headers carry a
  trailing non-breaking space in the source template; headers are matched
  verbatim.

ENVIRONMENT VARIABLES:
  XLSX2CV_OUTPUT_DIR    Output directory (same as -o)
  XLSX2CV_SHEET         Sheet name (same as --sheet)
  XLSX2CV_FONT_REGULAR  Regular TTF face (same as --font-regular)
  XLSX2CV_FONT_BOLD     Bold TTF face (same as --font-bold)
  XLSX2CV_NO_PROGRESS   Disable the progress bar
  XLSX2CV_VERBOSE       Enable DEBUG-level logs
  XLSX2CV_QUIET         Suppress all output except errors
  RUST_LOG              Full tracing filter override (e.g. xlsx2cv=debug)

SETUP:
  Two TTF font files are required (regular + bold). By default they are
  looked up at fonts/DejaVuSans.ttf and fonts/DejaVuSans-Bold.ttf
  relative to the working directory.
"#;

/// Generate per-person PDF CVs from an XLSX personnel sheet.
#[derive(Parser, Debug)]
#[command(
    name = "xlsx2cv",
    version,
    about = "Generate per-person PDF CVs from an XLSX personnel sheet",
    long_about = "Read an XLSX sheet with one personnel row per person (numbered repeated-block \
columns for experience, education, and awards) and write one formatted, paginated PDF CV per row.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input XLSX workbook.
    #[arg(default_value = "input.xlsx")]
    input: PathBuf,

    /// Directory for the generated PDFs (created if missing).
    #[arg(short, long, env = "XLSX2CV_OUTPUT_DIR", default_value = "output_cvs")]
    output_dir: PathBuf,

    /// Sheet name to read (default: first sheet in the workbook).
    #[arg(long, env = "XLSX2CV_SHEET")]
    sheet: Option<String>,

    /// Regular TTF font face embedded in the PDFs.
    #[arg(
        long,
        env = "XLSX2CV_FONT_REGULAR",
        default_value = "fonts/DejaVuSans.ttf"
    )]
    font_regular: PathBuf,

    /// Bold TTF font face embedded in the PDFs.
    #[arg(
        long,
        env = "XLSX2CV_FONT_BOLD",
        default_value = "fonts/DejaVuSans-Bold.ttf"
    )]
    font_bold: PathBuf,

    /// Abort on the first row failure instead of continuing.
    #[arg(long)]
    fail_fast: bool,

    /// Output a structured JSON report (per-row results + stats) on stdout.
    #[arg(long, env = "XLSX2CV_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "XLSX2CV_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "XLSX2CV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "XLSX2CV_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
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

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn BatchProgressCallback>)
    } else {
        None
    };

    let mut builder = BatchConfig::builder()
        .input_path(&cli.input)
        .output_dir(&cli.output_dir)
        .font_regular(&cli.font_regular)
        .font_bold(&cli.font_bold)
        .fail_fast(cli.fail_fast);
    if let Some(ref sheet) = cli.sheet {
        builder = builder.sheet(sheet.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_batch(&config).context("Batch conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        // Only print inline stats when the progress callback is disabled.
        eprintln!(
            "Generated {}/{} CVs in {}ms → {}",
            output.stats.generated,
            output.stats.total_rows,
            output.stats.total_duration_ms,
            bold(&cli.output_dir.display().to_string()),
        );
        if output.stats.failed > 0 {
            eprintln!("  {} rows failed:", output.stats.failed);
            for row in output.rows.iter().filter(|r| r.error.is_some()) {
                if let Some(ref e) = row.error {
                    eprintln!("    {} {}", red("✗"), e);
                }
            }
        }
    }

    if output.stats.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_char_boundary_safe() {
        let msg = format!("{}é and more", "x".repeat(78));
        let cut = truncate_message(&msg, 79);
        assert!(cut.ends_with('\u{2026}'));
        assert_eq!(cut.chars().count(), 80);

        assert_eq!(truncate_message("short", 79), "short");
        assert_eq!(truncate_message("", 79), "");
    }
}
