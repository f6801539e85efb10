//! Error types for the xlsx2cv library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Xlsx2CvError`] — **Fatal**: the batch cannot proceed at all (missing
//!   workbook, unreadable sheet, missing font assets, output directory
//!   cannot be created). Returned as `Err(Xlsx2CvError)` from the top-level
//!   `convert*` functions before any row is processed.
//!
//! * [`RowError`] — **Non-fatal**: a single row failed to render or write
//!   but the remaining rows are fine. Stored inside
//!   [`crate::output::RowResult`] so callers can inspect partial success
//!   rather than losing the whole batch to one bad row.
//!
//! Blank fields and malformed dates are *not* errors anywhere in this
//! taxonomy: they normalize to empty strings and are suppressed or replaced
//! with placeholders at render time.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the xlsx2cv library.
///
/// Row-level failures use [`RowError`] and are stored in
/// [`crate::output::RowResult`] rather than propagated here — unless
/// `fail_fast` is set, in which case the first one surfaces as
/// [`Xlsx2CvError::RowFailed`].
#[derive(Debug, Error)]
pub enum Xlsx2CvError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input workbook was not found at the given path.
    #[error("Workbook not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the workbook.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// calamine could not parse the file as an XLSX workbook.
    #[error("Failed to open workbook '{path}': {detail}")]
    WorkbookOpen { path: PathBuf, detail: String },

    /// The requested sheet does not exist in the workbook.
    #[error("Sheet '{sheet}' not found in '{path}'")]
    SheetNotFound { sheet: String, path: PathBuf },

    /// The workbook has no sheets, or the sheet has no header row.
    #[error("Workbook '{path}' has no usable data (empty sheet or missing header row)")]
    EmptySheet { path: PathBuf },

    // ── Font errors ───────────────────────────────────────────────────────
    /// A font file was not found at the configured path.
    #[error("Font file not found: '{path}'\nBoth a regular and a bold TTF face are required.")]
    FontNotFound { path: PathBuf },

    /// A font file exists but could not be parsed as a TTF face.
    #[error("Failed to parse font '{path}': {detail}")]
    FontParse { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF backend failed while composing or saving a document.
    #[error("PDF generation failed for '{path}': {detail}")]
    PdfWrite { path: PathBuf, detail: String },

    // ── Batch errors ──────────────────────────────────────────────────────
    /// Every row failed; no output was produced.
    #[error("All {total} rows failed.\nFirst error: {first_error}")]
    AllRowsFailed { total: usize, first_error: String },

    /// A row failed while `fail_fast` was set.
    #[error("Row {row} failed: {detail}")]
    RowFailed { row: usize, detail: String },

    /// Some rows succeeded but at least one failed.
    ///
    /// Returned by [`crate::output::BatchOutput::into_result`] when the
    /// caller wants to treat any row failure as an error.
    #[error("{failed}/{total} rows failed during conversion")]
    PartialFailure {
        generated: usize,
        failed: usize,
        total: usize,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single row.
///
/// Stored alongside [`crate::output::RowResult`] when a row fails.
/// The overall batch continues unless ALL rows fail or `fail_fast` is set.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum RowError {
    /// Laying out or composing the document failed.
    #[error("Row {row}: rendering failed: {detail}")]
    RenderFailed { row: usize, detail: String },

    /// The composed document could not be written to disk.
    #[error("Row {row}: failed to write '{path}': {detail}")]
    WriteFailed {
        row: usize,
        path: String,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_display() {
        let e = Xlsx2CvError::PartialFailure {
            generated: 9,
            failed: 1,
            total: 10,
        };
        let msg = e.to_string();
        assert!(msg.contains("1/10"), "got: {msg}");
    }

    #[test]
    fn sheet_not_found_display() {
        let e = Xlsx2CvError::SheetNotFound {
            sheet: "People".into(),
            path: PathBuf::from("input.xlsx"),
        };
        assert!(e.to_string().contains("People"));
        assert!(e.to_string().contains("input.xlsx"));
    }

    #[test]
    fn row_error_display() {
        let e = RowError::WriteFailed {
            row: 3,
            path: "output_cvs/Ana_Duarte_CV.pdf".into(),
            detail: "disk full".into(),
        };
        assert!(e.to_string().contains("Row 3"));
        assert!(e.to_string().contains("disk full"));
    }

    #[test]
    fn row_error_round_trips_through_serde() {
        let e = RowError::RenderFailed {
            row: 7,
            detail: "bad glyph".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: RowError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), e.to_string());
    }
}
