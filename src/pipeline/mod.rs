//! The conversion pipeline, one module per stage:
//!
//! ```text
//! input ──▶ extract ──▶ compose ──▶ pdf
//! (XLSX)    (records)   (doc IR)    (file)
//! ```
//!
//! [`input`] reads the workbook and exposes header-addressed rows.
//! [`extract`] walks the repeated-block column schema and builds
//! [`PersonRecord`](crate::record::PersonRecord)s. [`compose`] turns a
//! record into a flat list of drawing operations, wrapped and styled but
//! backend-agnostic. [`pdf`] walks those operations onto printpdf pages.
//! [`fonts`] loads the TTF faces and provides the width metric the
//! composer wraps against.

pub mod compose;
pub mod extract;
pub mod fonts;
pub mod input;
pub mod pdf;
