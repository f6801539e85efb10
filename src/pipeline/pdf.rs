//! PDF backend: walk a composed document IR and write the file.
//!
//! The printpdf layer carries the global mutable state a PDF inherently
//! has (current page, layer, cursor position). It is confined to an
//! explicit [`Cursor`] threaded through the draw calls, so everything
//! above this module stays a pure function of (record, context). This
//! module makes no layout decisions: lines arrive pre-wrapped, and the
//! only geometry it owns is the page-break check at the bottom margin and
//! the centering arithmetic.

use crate::config::PageMetrics;
use crate::error::Xlsx2CvError;
use crate::pipeline::compose::{Align, DocOp, Style, TextMeasure};
use crate::pipeline::fonts::FontSet;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Dark blue used for the title and section headings (RGB 40, 40, 80).
const HEADING_COLOR: (f32, f32, f32) = (40.0 / 255.0, 40.0 / 255.0, 80.0 / 255.0);

/// The mutable rendering state: current layer and the cursor's distance
/// from the top of the page.
struct Cursor {
    layer: PdfLayerReference,
    y_mm: f32,
}

/// Write the composed document to `path`, overwriting any existing file.
pub fn write_pdf(
    ops: &[DocOp],
    fonts: &FontSet,
    page: &PageMetrics,
    title: &str,
    path: &Path,
) -> Result<(), Xlsx2CvError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(page.width_mm),
        Mm(page.height_mm),
        "content",
    );

    let pdf_err = |detail: String| Xlsx2CvError::PdfWrite {
        path: path.to_path_buf(),
        detail,
    };

    let regular: IndirectFontRef = doc
        .add_external_font(fonts.regular.bytes.as_slice())
        .map_err(|e| pdf_err(e.to_string()))?;
    let bold: IndirectFontRef = doc
        .add_external_font(fonts.bold.bytes.as_slice())
        .map_err(|e| pdf_err(e.to_string()))?;

    let mut cursor = Cursor {
        layer: doc.get_page(first_page).get_layer(first_layer),
        y_mm: page.margin_mm,
    };

    for op in ops {
        match op {
            DocOp::Gap(g) => cursor.y_mm += *g,
            DocOp::Rule => {
                break_page_if_needed(&doc, &mut cursor, page, 2.0);
                draw_rule(&cursor, page);
                cursor.y_mm += 2.0;
            }
            DocOp::Text { text, style, align } => {
                let line_h = style.line_height_mm();
                break_page_if_needed(&doc, &mut cursor, page, line_h);

                let x = match align {
                    Align::Left => page.margin_mm,
                    Align::Center => {
                        let width = fonts.width_mm(text, *style);
                        ((page.width_mm - width) / 2.0).max(page.margin_mm)
                    }
                };
                // Baseline sits 3/4 of the line height below the line top.
                let baseline = page.height_mm - cursor.y_mm - 0.75 * line_h;

                let (r, g, b) = text_color(*style);
                cursor.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
                let font = if style.is_bold() { &bold } else { &regular };
                cursor
                    .layer
                    .use_text(text.clone(), style.size_pt(), Mm(x), Mm(baseline), font);

                cursor.y_mm += line_h;
            }
        }
    }

    let file = File::create(path).map_err(|e| Xlsx2CvError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| pdf_err(e.to_string()))
}

fn text_color(style: Style) -> (f32, f32, f32) {
    match style {
        Style::Title | Style::Heading => HEADING_COLOR,
        Style::Body | Style::BodyBold => (0.0, 0.0, 0.0),
    }
}

/// Start a new page when `needed` millimetres would cross the bottom
/// margin, resetting the cursor to the top margin.
fn break_page_if_needed(
    doc: &PdfDocumentReference,
    cursor: &mut Cursor,
    page: &PageMetrics,
    needed: f32,
) {
    if cursor.y_mm + needed > page.height_mm - page.margin_mm {
        let (next_page, next_layer) =
            doc.add_page(Mm(page.width_mm), Mm(page.height_mm), "content");
        cursor.layer = doc.get_page(next_page).get_layer(next_layer);
        cursor.y_mm = page.margin_mm;
    }
}

/// Full-width horizontal rule at the cursor, in the heading colour.
fn draw_rule(cursor: &Cursor, page: &PageMetrics) {
    let y = page.height_mm - cursor.y_mm - 1.0;
    let rule = Line {
        points: vec![
            (Point::new(Mm(page.margin_mm), Mm(y)), false),
            (
                Point::new(Mm(page.width_mm - page.margin_mm), Mm(y)),
                false,
            ),
        ],
        is_closed: false,
    };
    let (r, g, b) = HEADING_COLOR;
    cursor.layer.set_outline_color(Color::Rgb(Rgb::new(r, g, b, None)));
    cursor.layer.set_outline_thickness(0.5);
    cursor.layer.add_line(rule);
}
