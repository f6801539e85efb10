//! # xlsx2cv
//!
//! Convert rows of an XLSX personnel sheet into individual PDF résumés.
//!
//! ## Why this crate?
//!
//! HR exports commonly arrive as one wide spreadsheet row per person, with
//! repeated sections flattened into numbered columns (`Company`,
//! `Company2`, … `Company5`) and assorted header quirks — trailing
//! non-breaking spaces, suffix sequences that skip numbers. Filling a CV
//! template by hand from that is slow and error-prone. This crate maps
//! each sparse, irregularly-suffixed row into a clean person record and
//! renders it as a paginated, sectioned PDF, one file per row.
//!
//! ## Pipeline Overview
//!
//! ```text
//! XLSX
//!  │
//!  ├─ 1. Input    open workbook, index columns by header text
//!  ├─ 2. Extract  normalize cells, walk repeated-block schemas
//!  ├─ 3. Compose  person record → flat list of draw ops (pure)
//!  └─ 4. Render   draw ops → paginated PDF with embedded TTF fonts
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xlsx2cv::{convert_batch, BatchConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::builder()
//!         .input_path("input.xlsx")
//!         .output_dir("output_cvs")
//!         .build()?;
//!     let output = convert_batch(&config)?;
//!     println!(
//!         "{} of {} CVs generated in {} ms",
//!         output.stats.generated,
//!         output.stats.total_rows,
//!         output.stats.total_duration_ms
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `xlsx2cv` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! xlsx2cv = { version = "0.3", default-features = false }
//! ```
//!
//! ## Error Model
//!
//! Setup failures (workbook or fonts missing, output directory not
//! writable) are fatal and return [`Xlsx2CvError`] before any row is
//! processed. After setup, each row is isolated: a bad row is recorded in
//! its [`RowResult`] and the batch continues. Blank cells and malformed
//! dates are never errors at all — they normalize to empty strings and
//! the renderer suppresses the affected lines or substitutes a
//! placeholder.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod schema;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{BatchConfig, BatchConfigBuilder, PageMetrics};
pub use convert::{convert_batch, convert_row, output_filename};
pub use error::{RowError, Xlsx2CvError};
pub use output::{BatchOutput, BatchStats, RowResult};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use record::{Award, Education, Experience, PersonRecord};
