//! Result types returned by the batch driver.
//!
//! [`BatchOutput`] holds one [`RowResult`] per data row plus aggregate
//! [`BatchStats`]. All types serialise to JSON so the CLI's `--json` mode
//! and any host application can persist a run report verbatim.

use crate::error::{RowError, Xlsx2CvError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one data row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowResult {
    /// 1-indexed data row number (header row not counted).
    pub row_num: usize,
    /// Full display name of the person, for reporting.
    pub full_name: String,
    /// Path of the written PDF; `None` when the row failed.
    pub output_path: Option<PathBuf>,
    /// The row's error, if it failed.
    pub error: Option<RowError>,
    /// Wall-clock time spent on this row.
    pub duration_ms: u64,
}

/// Aggregate statistics for a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Data rows found in the sheet.
    pub total_rows: usize,
    /// Rows whose PDF was written.
    pub generated: usize,
    /// Rows that failed to render or write.
    pub failed: usize,
    /// Total wall-clock time for the batch, including workbook loading.
    pub total_duration_ms: u64,
    /// Time spent composing and writing PDFs.
    pub render_duration_ms: u64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub rows: Vec<RowResult>,
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Treat any row failure as an error.
    ///
    /// Returns `self` unchanged when every row succeeded, otherwise
    /// [`Xlsx2CvError::PartialFailure`].
    pub fn into_result(self) -> Result<BatchOutput, Xlsx2CvError> {
        if self.stats.failed == 0 {
            Ok(self)
        } else {
            Err(Xlsx2CvError::PartialFailure {
                generated: self.stats.generated,
                failed: self.stats.failed,
                total: self.stats.total_rows,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(generated: usize, failed: usize) -> BatchOutput {
        BatchOutput {
            rows: Vec::new(),
            stats: BatchStats {
                total_rows: generated + failed,
                generated,
                failed,
                ..Default::default()
            },
        }
    }

    #[test]
    fn into_result_passes_clean_runs() {
        assert!(output(3, 0).into_result().is_ok());
    }

    #[test]
    fn into_result_flags_partial_failure() {
        let err = output(2, 1).into_result().unwrap_err();
        assert!(matches!(
            err,
            Xlsx2CvError::PartialFailure {
                generated: 2,
                failed: 1,
                total: 3
            }
        ));
    }

    #[test]
    fn row_result_serialises() {
        let r = RowResult {
            row_num: 1,
            full_name: "Ana Duarte".into(),
            output_path: Some(PathBuf::from("output_cvs/Ana_Duarte_CV.pdf")),
            error: None,
            duration_ms: 12,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("Ana_Duarte_CV.pdf"));
        let back: RowResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.row_num, 1);
    }
}
