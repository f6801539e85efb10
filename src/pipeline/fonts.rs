//! Font assets: TTF loading and string-width measurement.
//!
//! The same TTF bytes serve two consumers: printpdf embeds them in the
//! output document, and rusttype reads their glyph metrics so the wrap
//! algorithm measures strings with the *actual* face being rendered
//! rather than an average-character estimate. Rendered text and measured
//! text can therefore never disagree about where a line ends.

use crate::error::Xlsx2CvError;
use crate::pipeline::compose::{Style, TextMeasure};
use rusttype::{Font, Scale};
use std::path::Path;

/// Points → millimetres (1 pt = 1/72 inch).
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// One loaded TTF face: raw bytes for embedding, parsed face for metrics.
#[derive(Debug)]
pub struct FontData {
    pub bytes: Vec<u8>,
    face: Font<'static>,
}

impl FontData {
    fn load(path: &Path) -> Result<Self, Xlsx2CvError> {
        if !path.exists() {
            return Err(Xlsx2CvError::FontNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|e| Xlsx2CvError::FontParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let face = Font::try_from_vec(bytes.clone()).ok_or_else(|| Xlsx2CvError::FontParse {
            path: path.to_path_buf(),
            detail: "not a parseable TTF face".to_string(),
        })?;
        Ok(Self { bytes, face })
    }

    /// Advance width of `text` at `size_pt`, in points.
    ///
    /// Sum of scaled glyph advances; kerning is ignored, which slightly
    /// overestimates — lines break a hair early rather than overflow.
    pub fn text_width_pt(&self, text: &str, size_pt: f32) -> f32 {
        let scale = Scale::uniform(size_pt);
        text.chars()
            .map(|c| self.face.glyph(c).scaled(scale).h_metrics().advance_width)
            .sum()
    }
}

/// The two weights of the embedded face.
#[derive(Debug)]
pub struct FontSet {
    pub regular: FontData,
    pub bold: FontData,
}

impl FontSet {
    /// Load both faces. Missing or unparseable files are fatal — no
    /// document can be produced without them.
    pub fn load(regular: &Path, bold: &Path) -> Result<Self, Xlsx2CvError> {
        Ok(Self {
            regular: FontData::load(regular)?,
            bold: FontData::load(bold)?,
        })
    }

    /// The face a style renders with.
    pub fn face_for(&self, style: Style) -> &FontData {
        if style.is_bold() {
            &self.bold
        } else {
            &self.regular
        }
    }
}

impl TextMeasure for FontSet {
    fn width_mm(&self, text: &str, style: Style) -> f32 {
        self.face_for(style).text_width_pt(text, style.size_pt()) * PT_TO_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Common DejaVu Sans install locations (Linux distros and macOS).
    pub(crate) fn system_dejavu() -> Option<(PathBuf, PathBuf)> {
        const CANDIDATES: &[(&str, &str)] = &[
            (
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            ),
            (
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            ),
            (
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            ),
        ];
        CANDIDATES
            .iter()
            .map(|(r, b)| (PathBuf::from(r), PathBuf::from(b)))
            .find(|(r, b)| r.exists() && b.exists())
    }

    #[test]
    fn missing_font_is_fatal() {
        let err = FontSet::load(
            Path::new("/no/such/font.ttf"),
            Path::new("/no/such/font-bold.ttf"),
        )
        .unwrap_err();
        assert!(matches!(err, Xlsx2CvError::FontNotFound { .. }));
    }

    #[test]
    fn widths_scale_with_text_and_size() {
        let Some((regular, bold)) = system_dejavu() else {
            eprintln!("SKIP — no system DejaVu Sans found");
            return;
        };
        let fonts = FontSet::load(&regular, &bold).unwrap();

        let short = fonts.width_mm("abc", Style::Body);
        let long = fonts.width_mm("abcabc", Style::Body);
        assert!(long > short);
        assert!((long - 2.0 * short).abs() < 0.01, "advances should add up");

        let small = fonts.regular.text_width_pt("abc", 12.0);
        let big = fonts.regular.text_width_pt("abc", 24.0);
        assert!((big - 2.0 * small).abs() < 0.01, "linear in font size");

        assert_eq!(fonts.width_mm("", Style::Body), 0.0);
    }
}
