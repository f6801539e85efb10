//! Workbook input: open an XLSX file and expose named-column row access.
//!
//! ## Why an owned `Sheet` instead of streaming rows?
//!
//! Personnel sheets are small (hundreds of rows, not millions), and the
//! extractor needs random access by *column name* — including headers that
//! end in a non-breaking space. Loading the sheet once into a header-index
//! map plus owned cell rows keeps the rest of the pipeline free of calamine
//! types and lets tests build a [`Sheet`] from in-memory data without a
//! file on disk.
//!
//! Header names are taken **verbatim** from the first row: no trimming.
//! `str::trim` would strip the trailing U+00A0 that several real headers
//! carry, silently breaking column lookup.

use crate::error::Xlsx2CvError;
use crate::normalize::{cell_to_string, normalize_date, normalize_value};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// An in-memory sheet: header-name → column-index map plus data rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    /// Build a sheet from in-memory parts. Mainly useful in tests and for
    /// callers that already hold tabular data.
    pub fn from_parts(headers: &[&str], rows: Vec<Vec<Data>>) -> Self {
        let headers = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();
        Self { headers, rows }
    }

    /// Number of data rows (the header row is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the data rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { sheet: self, cells })
    }
}

/// One data row, addressable by exact column header.
///
/// A missing column and an empty cell are indistinguishable on purpose:
/// both normalize to `""`.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    cells: &'a [Data],
}

impl Row<'_> {
    fn raw(&self, column: &str) -> Option<&Data> {
        self.sheet
            .headers
            .get(column)
            .and_then(|&idx| self.cells.get(idx))
    }

    /// The normalized value of the named column.
    pub fn value(&self, column: &str) -> String {
        self.raw(column)
            .map(|cell| normalize_value(&cell_to_string(cell)))
            .unwrap_or_default()
    }

    /// The normalized value of the named column, via the date heuristic.
    pub fn date(&self, column: &str) -> String {
        self.raw(column)
            .map(|cell| normalize_date(&cell_to_string(cell)))
            .unwrap_or_default()
    }
}

/// Open the workbook at `path` and load the named sheet (or the first
/// sheet when `sheet` is `None`).
///
/// All failures here are fatal: they abort the batch before any row is
/// processed.
pub fn open_sheet(path: &Path, sheet: Option<&str>) -> Result<Sheet, Xlsx2CvError> {
    if !path.exists() {
        return Err(Xlsx2CvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    // Check read permission explicitly so the error names the real cause
    // rather than surfacing as a generic parse failure.
    if let Err(e) = std::fs::File::open(path) {
        return Err(match e.kind() {
            std::io::ErrorKind::PermissionDenied => Xlsx2CvError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Xlsx2CvError::FileNotFound {
                path: path.to_path_buf(),
            },
        });
    }

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| Xlsx2CvError::WorkbookOpen {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s.as_str() == name) {
                return Err(Xlsx2CvError::SheetNotFound {
                    sheet: name.to_string(),
                    path: path.to_path_buf(),
                });
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Xlsx2CvError::EmptySheet {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Xlsx2CvError::WorkbookOpen {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| Xlsx2CvError::EmptySheet {
        path: path.to_path_buf(),
    })?;

    // Headers verbatim — trailing non-breaking spaces are significant.
    let headers: HashMap<String, usize> = header_row
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| {
            if matches!(cell, Data::Empty) {
                None
            } else {
                Some((cell_to_string(cell), idx))
            }
        })
        .collect();

    if headers.is_empty() {
        return Err(Xlsx2CvError::EmptySheet {
            path: path.to_path_buf(),
        });
    }

    let data_rows: Vec<Vec<Data>> = rows.map(|r| r.to_vec()).collect();
    debug!(
        "Loaded sheet '{}': {} columns, {} data rows",
        sheet_name,
        headers.len(),
        data_rows.len()
    );

    Ok(Sheet {
        headers,
        rows: data_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        Sheet::from_parts(
            &["First Name", "LinkedIn Profile\u{a0}", "Date of Birth"],
            vec![vec![
                Data::String("Ana".into()),
                Data::String("  linkedin.com/in/ana  ".into()),
                Data::String("1990-04-02 00:00:00".into()),
            ]],
        )
    }

    #[test]
    fn lookup_by_exact_header() {
        let sheet = sample_sheet();
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.value("First Name"), "Ana");
        // NBSP headers resolve only with the NBSP present.
        assert_eq!(row.value("LinkedIn Profile\u{a0}"), "linkedin.com/in/ana");
        assert_eq!(row.value("LinkedIn Profile"), "");
    }

    #[test]
    fn missing_column_is_empty() {
        let sheet = sample_sheet();
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.value("No Such Column"), "");
        assert_eq!(row.date("No Such Column"), "");
    }

    #[test]
    fn date_accessor_applies_heuristic() {
        let sheet = sample_sheet();
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.date("Date of Birth"), "1990-04-02");
    }

    #[test]
    fn open_sheet_missing_file_is_fatal() {
        let err = open_sheet(Path::new("/no/such/workbook.xlsx"), None).unwrap_err();
        assert!(matches!(err, Xlsx2CvError::FileNotFound { .. }));
    }
}
