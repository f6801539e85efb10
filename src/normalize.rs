//! Value and date normalization for raw spreadsheet cells.
//!
//! ## Why normalize at the edge?
//!
//! Personnel exports are messy: half-filled repeated blocks, literal "NaN"
//! strings left behind by earlier tooling, dates stored sometimes as real
//! datetime cells and sometimes as free text ("March 2020"). Normalizing
//! every cell to a plain `String` at read time means the rest of the crate
//! has exactly one rule to remember: **empty string means absent**. No
//! `Option`, no missing-value marker, no special cases downstream.
//!
//! Date handling is a best-effort heuristic, not a parser — a malformed
//! date passes through unchanged rather than failing the row.

use calamine::Data;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an ISO date prefix (`YYYY-MM-DD`) at the start of a string.
static RE_ISO_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Convert a raw calamine cell into its string form.
///
/// * `Empty` and `Error` cells become `""`.
/// * Floats with no fractional part print without the trailing `.0`, so a
///   phone number stored as `61234567.0` comes back as `"61234567"`.
/// * Datetime cells format as `YYYY-MM-DD HH:MM:SS`, which lets
///   [`normalize_date`] take the ISO prefix.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Normalize a raw cell string.
///
/// Trims surrounding whitespace and collapses the textual missing-value
/// spellings ("nan", "none", "null", any case) to `""`. Total and
/// idempotent: it never fails, and applying it twice is a no-op.
pub fn normalize_value(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("null")
    {
        return String::new();
    }
    trimmed.to_string()
}

/// Normalize a raw cell string that is expected to hold a date.
///
/// Applies [`normalize_value`] first, then:
/// 1. if the value starts with an ISO date (`YYYY-MM-DD`), return just that
///    prefix — this strips the `00:00:00` tail that datetime cells carry;
/// 2. else, if the value contains a space, return the part before the first
///    space;
/// 3. else return the value unchanged.
pub fn normalize_date(raw: &str) -> String {
    let value = normalize_value(raw);
    if let Some(m) = RE_ISO_DATE_PREFIX.find(&value) {
        return value[..m.end()].to_string();
    }
    match value.split_once(' ') {
        Some((head, _)) => head.to_string(),
        None => value,
    }
}
