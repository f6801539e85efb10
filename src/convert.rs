//! Batch driver: the top-level entry point tying the pipeline together.
//!
//! [`convert_batch`] opens the workbook once, loads the fonts once, then
//! processes every data row strictly in order. Each row is isolated: a
//! failure is recorded in its [`RowResult`] and the batch moves on, so
//! one malformed entry never costs the other ninety-nine PDFs. Set
//! [`BatchConfig::fail_fast`] to get the old abort-on-first-error
//! behaviour back.

use crate::config::{BatchConfig, PageMetrics};
use crate::error::{RowError, Xlsx2CvError};
use crate::output::{BatchOutput, BatchStats, RowResult};
use crate::pipeline::compose::compose;
use crate::pipeline::extract::build_record;
use crate::pipeline::fonts::FontSet;
use crate::pipeline::input::open_sheet;
use crate::pipeline::pdf::write_pdf;
use crate::record::PersonRecord;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every row of the configured workbook into a PDF in
/// `output_dir`.
///
/// Fatal setup problems (missing workbook, missing fonts, output
/// directory cannot be created) return `Err` before any row is touched.
/// Per-row failures are collected in the returned [`BatchOutput`]; the
/// call only fails after setup if *every* row failed, or if `fail_fast`
/// is set and any row failed.
pub fn convert_batch(config: &BatchConfig) -> Result<BatchOutput, Xlsx2CvError> {
    let batch_start = Instant::now();

    let fonts = FontSet::load(&config.font_regular, &config.font_bold)?;
    let sheet = open_sheet(&config.input_path, config.sheet.as_deref())?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| Xlsx2CvError::OutputDir {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let total = sheet.row_count();
    info!(
        input = %config.input_path.display(),
        output_dir = %config.output_dir.display(),
        rows = total,
        "starting batch conversion"
    );
    if let Some(cb) = &config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut results = Vec::with_capacity(total);
    let mut render_duration_ms = 0u64;

    for (idx, row) in sheet.rows().enumerate() {
        let row_num = idx + 1;
        let row_start = Instant::now();

        if let Some(cb) = &config.progress_callback {
            cb.on_row_start(row_num, total);
        }

        let record = build_record(&row);
        let full_name = record.full_name();
        let output_path = config.output_dir.join(output_filename(&record));

        debug!(row = row_num, name = %full_name, "rendering row");
        let outcome = convert_row(&record, &fonts, &config.page, &output_path);
        let duration_ms = row_start.elapsed().as_millis() as u64;
        render_duration_ms += duration_ms;

        match outcome {
            Ok(()) => {
                if let Some(cb) = &config.progress_callback {
                    cb.on_row_complete(row_num, total, &output_path);
                }
                results.push(RowResult {
                    row_num,
                    full_name,
                    output_path: Some(output_path),
                    error: None,
                    duration_ms,
                });
            }
            Err(e) => {
                let row_error = match &e {
                    Xlsx2CvError::OutputWriteFailed { path, source } => RowError::WriteFailed {
                        row: row_num,
                        path: path.display().to_string(),
                        detail: source.to_string(),
                    },
                    Xlsx2CvError::PdfWrite { path, detail } => RowError::WriteFailed {
                        row: row_num,
                        path: path.display().to_string(),
                        detail: detail.clone(),
                    },
                    other => RowError::RenderFailed {
                        row: row_num,
                        detail: other.to_string(),
                    },
                };
                warn!(row = row_num, error = %row_error, "row failed");
                if let Some(cb) = &config.progress_callback {
                    cb.on_row_error(row_num, total, &row_error.to_string());
                }
                if config.fail_fast {
                    return Err(Xlsx2CvError::RowFailed {
                        row: row_num,
                        detail: row_error.to_string(),
                    });
                }
                results.push(RowResult {
                    row_num,
                    full_name,
                    output_path: None,
                    error: Some(row_error),
                    duration_ms,
                });
            }
        }
    }

    let generated = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - generated;

    if generated == 0 && !results.is_empty() {
        let first_error = results
            .iter()
            .find_map(|r| r.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(Xlsx2CvError::AllRowsFailed {
            total: results.len(),
            first_error,
        });
    }

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_complete(total, generated);
    }

    let stats = BatchStats {
        total_rows: results.len(),
        generated,
        failed,
        total_duration_ms: batch_start.elapsed().as_millis() as u64,
        render_duration_ms,
    };
    info!(
        generated = stats.generated,
        failed = stats.failed,
        duration_ms = stats.total_duration_ms,
        "batch conversion finished"
    );

    Ok(BatchOutput { rows: results, stats })
}

/// Render a single record to `path`. Exposed for callers that already
/// hold a [`PersonRecord`] and want one document, not a batch.
pub fn convert_row(
    record: &PersonRecord,
    fonts: &FontSet,
    page: &PageMetrics,
    path: &Path,
) -> Result<(), Xlsx2CvError> {
    let ops = compose(record, page, fonts);
    let title = format!("{} CV", record.full_name());
    write_pdf(&ops, fonts, page, &title, path)
}

/// Output file name for a record: `First_Last_CV.pdf`, with every space
/// in either name part replaced by an underscore. A record with no name
/// at all still gets a (degenerate) `__CV.pdf` rather than an error.
pub fn output_filename(record: &PersonRecord) -> String {
    format!("{}_{}_CV.pdf", record.first_name, record.last_name).replace(' ', "_")
}
