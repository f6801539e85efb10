//! Configuration for a batch conversion run.
//!
//! All behaviour is controlled through [`BatchConfig`], built via its
//! [`BatchConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to serialise a run's settings for logging and to diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest — the defaults reproduce the original
//! fixed-constant behaviour (`input.xlsx` → `output_cvs/`).

use crate::error::Xlsx2CvError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Page geometry and layout limits, in millimetres.
///
/// Defaults describe an A4 portrait page with 15 mm margins and a 160 mm
/// cap on the centered contact line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Uniform margin; also the automatic page-break threshold at the
    /// bottom of the page.
    pub margin_mm: f32,
    /// Maximum width of the wrapped, centered contact line.
    pub contact_width_mm: f32,
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 15.0,
            contact_width_mm: 160.0,
        }
    }
}

impl PageMetrics {
    /// Width available to left-aligned body text.
    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }
}

/// Configuration for one batch run.
///
/// Built via [`BatchConfig::builder()`] or [`BatchConfig::default()`].
///
/// # Example
/// ```rust
/// use xlsx2cv::BatchConfig;
///
/// let config = BatchConfig::builder()
///     .input_path("people.xlsx")
///     .output_dir("cvs")
///     .fail_fast(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Path to the input XLSX workbook. Default: `input.xlsx`.
    pub input_path: PathBuf,

    /// Directory receiving one PDF per row; created idempotently before
    /// the loop. Default: `output_cvs`.
    pub output_dir: PathBuf,

    /// Sheet name to read. `None` selects the workbook's first sheet.
    pub sheet: Option<String>,

    /// Regular-weight TTF face. Default: `fonts/DejaVuSans.ttf`.
    pub font_regular: PathBuf,

    /// Bold-weight TTF face of the same family. Default:
    /// `fonts/DejaVuSans-Bold.ttf`.
    pub font_bold: PathBuf,

    /// Abort the batch on the first row failure instead of recording it
    /// and continuing. Default: false.
    ///
    /// The reference behaviour aborted the whole batch when one row could
    /// not be rendered; per-row isolation is the hardened default here,
    /// and this flag restores fail-fast for callers that prefer to stop
    /// on bad data.
    pub fail_fast: bool,

    /// Page geometry. Default: A4 with 15 mm margins.
    pub page: PageMetrics,

    /// Progress callback fired per row. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.xlsx"),
            output_dir: PathBuf::from("output_cvs"),
            sheet: None,
            font_regular: PathBuf::from("fonts/DejaVuSans.ttf"),
            font_bold: PathBuf::from("fonts/DejaVuSans-Bold.ttf"),
            fail_fast: false,
            page: PageMetrics::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("input_path", &self.input_path)
            .field("output_dir", &self.output_dir)
            .field("sheet", &self.sheet)
            .field("font_regular", &self.font_regular)
            .field("font_bold", &self.font_bold)
            .field("fail_fast", &self.fail_fast)
            .field("page", &self.page)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn sheet(mut self, name: impl Into<String>) -> Self {
        self.config.sheet = Some(name.into());
        self
    }

    pub fn font_regular(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_regular = path.into();
        self
    }

    pub fn font_bold(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_bold = path.into();
        self
    }

    pub fn fail_fast(mut self, v: bool) -> Self {
        self.config.fail_fast = v;
        self
    }

    pub fn page(mut self, page: PageMetrics) -> Self {
        self.config.page = page;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating geometry constraints.
    pub fn build(self) -> Result<BatchConfig, Xlsx2CvError> {
        let p = &self.config.page;
        if p.width_mm <= 0.0 || p.height_mm <= 0.0 {
            return Err(Xlsx2CvError::InvalidConfig(format!(
                "Page dimensions must be positive, got {}×{} mm",
                p.width_mm, p.height_mm
            )));
        }
        if 2.0 * p.margin_mm >= p.width_mm.min(p.height_mm) {
            return Err(Xlsx2CvError::InvalidConfig(format!(
                "Margins ({} mm) leave no content area on a {}×{} mm page",
                p.margin_mm, p.width_mm, p.height_mm
            )));
        }
        if p.contact_width_mm > p.content_width_mm() {
            return Err(Xlsx2CvError::InvalidConfig(format!(
                "Contact line width ({} mm) exceeds the content width ({} mm)",
                p.contact_width_mm,
                p.content_width_mm()
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_reference_constants() {
        let config = BatchConfig::default();
        assert_eq!(config.input_path, PathBuf::from("input.xlsx"));
        assert_eq!(config.output_dir, PathBuf::from("output_cvs"));
        assert!(!config.fail_fast);
        assert_eq!(config.page.margin_mm, 15.0);
    }

    #[test]
    fn builder_rejects_oversized_margins() {
        let err = BatchConfig::builder()
            .page(PageMetrics {
                margin_mm: 120.0,
                ..PageMetrics::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Xlsx2CvError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_contact_wider_than_content() {
        let err = BatchConfig::builder()
            .page(PageMetrics {
                contact_width_mm: 200.0,
                ..PageMetrics::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Xlsx2CvError::InvalidConfig(_)));
    }

    #[test]
    fn builder_sets_paths() {
        let config = BatchConfig::builder()
            .input_path("people.xlsx")
            .output_dir("cvs")
            .sheet("Staff")
            .build()
            .unwrap();
        assert_eq!(config.input_path, PathBuf::from("people.xlsx"));
        assert_eq!(config.sheet.as_deref(), Some("Staff"));
    }
}
