//! Layout composition: turn a [`PersonRecord`] into a flat document IR.
//!
//! ## Why an intermediate representation?
//!
//! The PDF backend carries global mutable state (current font, colour,
//! cursor, page). Composing first into a `Vec<DocOp>` — one op per already
//! wrapped line, rule, or gap — keeps the layout rules a pure function of
//! (record, page metrics, text measure). Section ordering, placeholder
//! rules, and the wrap algorithm are all testable here without producing
//! a single PDF byte; the backend in [`crate::pipeline::pdf`] only walks
//! ops, breaks pages, and draws.

use crate::config::PageMetrics;
use crate::record::PersonRecord;

/// Font/size/colour variant for a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Large bold header line (the person's name). 22 pt, dark blue.
    Title,
    /// Bold section heading. 14 pt, dark blue.
    Heading,
    /// Regular body text. 12 pt, black.
    Body,
    /// Bold body text (entry headlines). 12 pt, black.
    BodyBold,
}

impl Style {
    /// Font size in points.
    pub fn size_pt(self) -> f32 {
        match self {
            Style::Title => 22.0,
            Style::Heading => 14.0,
            Style::Body | Style::BodyBold => 12.0,
        }
    }

    /// Vertical space one line of this style occupies, in millimetres.
    pub fn line_height_mm(self) -> f32 {
        match self {
            Style::Title => 14.0,
            Style::Heading => 10.0,
            Style::Body | Style::BodyBold => 8.0,
        }
    }

    /// Whether this style uses the bold face.
    pub fn is_bold(self) -> bool {
        !matches!(self, Style::Body)
    }
}

/// Horizontal placement of a line within the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One drawing instruction. `Text` is always a single, pre-wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub enum DocOp {
    Text {
        text: String,
        style: Style,
        align: Align,
    },
    /// Full-width horizontal rule under a section heading.
    Rule,
    /// Vertical gap in millimetres.
    Gap(f32),
}

/// String-width metric for the active font of a style, in millimetres.
///
/// The PDF backend implements this over the embedded TTF faces; tests use
/// a fixed-advance stand-in. Keeping the measure behind a trait is what
/// lets [`compose`] stay pure.
pub trait TextMeasure {
    fn width_mm(&self, text: &str, style: Style) -> f32;
}

/// Greedy word wrap: accumulate words while `current + " " + word` still
/// fits `max_width` under `measure`; flush and start a new line when it
/// would not. A single word wider than the limit is emitted on its own
/// line — words are never split.
pub fn wrap_greedy<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let tentative = format!("{current} {word}");
        if measure(&tentative) <= max_width {
            current = tentative;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a free-text skills field into a clean comma-joined list.
///
/// Splits on commas when any comma is present, otherwise on newlines;
/// each item is trimmed and empty items are dropped.
pub fn format_skills(raw: &str) -> String {
    let parts: Vec<&str> = if raw.contains(',') {
        raw.split(',').collect()
    } else {
        raw.lines().collect()
    };
    parts
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Section placeholder shown when no work experience survived extraction.
pub const NO_EXPERIENCE: &str = "No work experience provided.";
/// Section placeholder shown when no education entry survived extraction.
pub const NO_EDUCATION: &str = "No education information provided.";

/// Compose the full document IR for one person.
///
/// Layout is strictly sequential top-to-bottom: header block, then the six
/// sections in fixed order. The Awards section (header included) is
/// omitted entirely when the sequence is empty; the other sections always
/// show their heading.
pub fn compose(
    record: &PersonRecord,
    page: &PageMetrics,
    measure: &dyn TextMeasure,
) -> Vec<DocOp> {
    let mut ops = Vec::new();
    let body_width = page.content_width_mm();

    header(&mut ops, record, page, measure);

    section(&mut ops, "Profile Summary");
    if !record.summary.is_empty() {
        paragraph(&mut ops, &record.summary, body_width, measure);
    }

    section(&mut ops, "Work Experience");
    if record.experiences.is_empty() {
        body(&mut ops, NO_EXPERIENCE);
    } else {
        for exp in &record.experiences {
            // Block inclusion keyed on the company alone; re-check both
            // headline fields before drawing anything for the entry.
            if exp.job_title.is_empty() && exp.company.is_empty() {
                continue;
            }
            bold(
                &mut ops,
                &format!(
                    "{} at {} ({} - {})",
                    exp.job_title, exp.company, exp.start_date, exp.end_date
                ),
            );
            if !exp.location.is_empty() {
                body(&mut ops, &format!("Location: {}", exp.location));
            }
            if !exp.responsibility.is_empty() {
                paragraph(
                    &mut ops,
                    &format!("Responsibilities: {}", exp.responsibility),
                    body_width,
                    measure,
                );
            }
            ops.push(DocOp::Gap(2.0));
        }
    }

    section(&mut ops, "Education");
    if record.education.is_empty() {
        body(&mut ops, NO_EDUCATION);
    } else {
        for edu in &record.education {
            let headline = if edu.field.is_empty() {
                edu.level.clone()
            } else {
                format!("{} in {}", edu.level, edu.field)
            };
            bold(&mut ops, &headline);
            if !edu.institution.is_empty()
                || !edu.start_date.is_empty()
                || !edu.end_date.is_empty()
            {
                body(
                    &mut ops,
                    &format!(
                        "Institution: {} | Dates: {} - {}",
                        edu.institution, edu.start_date, edu.end_date
                    ),
                );
            }
            if !edu.location.is_empty() {
                body(&mut ops, &format!("Location: {}", edu.location));
            }
            ops.push(DocOp::Gap(2.0));
        }
    }

    section(&mut ops, "Skills & Tools");
    let skills = format_skills(&record.skills);
    if !skills.is_empty() {
        paragraph(&mut ops, &skills, body_width, measure);
    }

    section(&mut ops, "Languages");
    if !record.languages.is_empty() {
        paragraph(&mut ops, &record.languages, body_width, measure);
    }

    if !record.awards.is_empty() {
        section(&mut ops, "Awards & Certificates");
        for award in &record.awards {
            if award.name.is_empty() {
                continue;
            }
            bold(
                &mut ops,
                &format!("{} from {} ({})", award.name, award.org, award.date),
            );
            if !award.description.is_empty() {
                paragraph(
                    &mut ops,
                    &format!("Description: {}", award.description),
                    body_width,
                    measure,
                );
            }
            ops.push(DocOp::Gap(2.0));
        }
    }

    ops
}

// ── Header block ─────────────────────────────────────────────────────────

fn header(
    ops: &mut Vec<DocOp>,
    record: &PersonRecord,
    page: &PageMetrics,
    measure: &dyn TextMeasure,
) {
    ops.push(DocOp::Text {
        text: record.full_name(),
        style: Style::Title,
        align: Align::Center,
    });

    let mut parts = Vec::new();
    if !record.email.is_empty() {
        parts.push(format!("Email: {}", record.email));
    }
    if !record.phone.is_empty() {
        parts.push(format!("Phone: {}", record.phone));
    }
    if !record.address.is_empty() {
        parts.push(format!("Address: {}", record.address));
    }
    if !record.linkedin.is_empty() {
        parts.push(format!("LinkedIn: {}", record.linkedin));
    }
    if !record.dob.is_empty() {
        parts.push(format!("Date of Birth: {}", record.dob));
    }

    if !parts.is_empty() {
        let contact = parts.join(" | ");
        for line in wrap_greedy(&contact, page.contact_width_mm, |s| {
            measure.width_mm(s, Style::Body)
        }) {
            ops.push(DocOp::Text {
                text: line,
                style: Style::Body,
                align: Align::Center,
            });
        }
    }
    ops.push(DocOp::Gap(4.0));
}

// ── Section helpers ──────────────────────────────────────────────────────

fn section(ops: &mut Vec<DocOp>, title: &str) {
    ops.push(DocOp::Text {
        text: title.to_string(),
        style: Style::Heading,
        align: Align::Left,
    });
    ops.push(DocOp::Rule);
    ops.push(DocOp::Gap(3.0));
}

fn body(ops: &mut Vec<DocOp>, text: &str) {
    ops.push(DocOp::Text {
        text: text.to_string(),
        style: Style::Body,
        align: Align::Left,
    });
}

fn bold(ops: &mut Vec<DocOp>, text: &str) {
    ops.push(DocOp::Text {
        text: text.to_string(),
        style: Style::BodyBold,
        align: Align::Left,
    });
}

fn paragraph(ops: &mut Vec<DocOp>, text: &str, max_width: f32, measure: &dyn TextMeasure) {
    for line in wrap_greedy(text, max_width, |s| measure.width_mm(s, Style::Body)) {
        body(ops, &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Award, Education, Experience};

    /// Fixed-advance measure: every char is 2 mm wide regardless of style.
    struct CharMeasure;

    impl TextMeasure for CharMeasure {
        fn width_mm(&self, text: &str, _style: Style) -> f32 {
            text.chars().count() as f32 * 2.0
        }
    }

    fn texts(ops: &[DocOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DocOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text lines between a section heading and the next heading (or end).
    fn section_lines<'a>(ops: &'a [DocOp], heading: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut in_section = false;
        for op in ops {
            if let DocOp::Text { text, style, .. } = op {
                if *style == Style::Heading {
                    if in_section {
                        break;
                    }
                    in_section = text == heading;
                    continue;
                }
                if in_section {
                    out.push(text.as_str());
                }
            }
        }
        out
    }

    fn sample_record() -> PersonRecord {
        PersonRecord {
            first_name: "Ana".into(),
            last_name: "Duarte".into(),
            email: "ana@example.com".into(),
            experiences: vec![Experience {
                company: "Acme".into(),
                job_title: "Engineer".into(),
                start_date: "2020-01-01".into(),
                end_date: "2023-06-30".into(),
                ..Default::default()
            }],
            education: vec![
                Education {
                    level: "BSc".into(),
                    field: "Physics".into(),
                    ..Default::default()
                },
                Education {
                    level: "MSc".into(),
                    field: "Data Science".into(),
                    ..Default::default()
                },
            ],
            awards: vec![Award {
                name: "Best Thesis".into(),
                org: "University of Lisbon".into(),
                date: "2019-07-01".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn wrap_fits_on_one_line() {
        let lines = wrap_greedy("short text", 100.0, |s: &str| s.len() as f32);
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn wrap_never_splits_a_word() {
        let lines = wrap_greedy("supercalifragilistic", 5.0, |s: &str| s.len() as f32);
        assert_eq!(lines, vec!["supercalifragilistic"]);
    }

    #[test]
    fn wrap_breaks_greedily() {
        let lines = wrap_greedy("aa bb cc dd", 5.0, |s: &str| s.len() as f32);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }

    #[test]
    fn wrap_of_blank_input_is_empty() {
        assert!(wrap_greedy("   ", 10.0, |s: &str| s.len() as f32).is_empty());
    }

    #[test]
    fn skills_split_on_comma_and_rejoin() {
        assert_eq!(format_skills("Python, SQL,  Excel"), "Python, SQL, Excel");
        assert_eq!(format_skills("Python\nSQL\n\nExcel"), "Python, SQL, Excel");
        assert_eq!(format_skills(""), "");
    }

    #[test]
    fn end_to_end_shape_for_sample_record() {
        let ops = compose(&sample_record(), &PageMetrics::default(), &CharMeasure);

        let work = section_lines(&ops, "Work Experience");
        assert_eq!(work.len(), 1);
        assert!(work[0].starts_with("Engineer at Acme ("), "got: {}", work[0]);

        let edu = section_lines(&ops, "Education");
        assert_eq!(edu[0], "BSc in Physics");
        assert_eq!(edu[1], "MSc in Data Science");

        let awards = section_lines(&ops, "Awards & Certificates");
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0], "Best Thesis from University of Lisbon (2019-07-01)");
    }

    #[test]
    fn empty_sequences_use_placeholders_and_drop_awards() {
        let record = PersonRecord {
            first_name: "Ana".into(),
            last_name: "Duarte".into(),
            ..Default::default()
        };
        let ops = compose(&record, &PageMetrics::default(), &CharMeasure);

        assert_eq!(section_lines(&ops, "Work Experience"), vec![NO_EXPERIENCE]);
        assert_eq!(section_lines(&ops, "Education"), vec![NO_EDUCATION]);
        // Awards heading absent entirely.
        assert!(!texts(&ops).contains(&"Awards & Certificates"));
        // Skills & Tools heading present with no content line before Languages.
        assert!(texts(&ops).contains(&"Skills & Tools"));
        assert!(section_lines(&ops, "Skills & Tools").is_empty());
    }

    #[test]
    fn header_is_centered_and_contact_skips_empty_fields() {
        let record = PersonRecord {
            first_name: "Ana".into(),
            last_name: "Duarte".into(),
            email: "ana@example.com".into(),
            dob: "1990-04-02".into(),
            ..Default::default()
        };
        let ops = compose(&record, &PageMetrics::default(), &CharMeasure);

        match &ops[0] {
            DocOp::Text { text, style, align } => {
                assert_eq!(text, "Ana Duarte");
                assert_eq!(*style, Style::Title);
                assert_eq!(*align, Align::Center);
            }
            other => panic!("expected title line, got {other:?}"),
        }

        let contact: Vec<String> = ops
            .iter()
            .filter_map(|op| match op {
                DocOp::Text {
                    text,
                    style: Style::Body,
                    align: Align::Center,
                } => Some(text.clone()),
                _ => None,
            })
            .collect();
        let joined = contact.join(" ");
        assert!(joined.contains("Email: ana@example.com"));
        assert!(joined.contains("Date of Birth: 1990-04-02"));
        assert!(!joined.contains("Phone:"));
        assert!(!joined.contains("Address:"));
    }

    #[test]
    fn experience_entry_with_blank_headline_is_skipped() {
        let record = PersonRecord {
            experiences: vec![Experience {
                // Pathological: extractor keyed on company, but both
                // headline fields ended up blank.
                ..Default::default()
            }],
            ..Default::default()
        };
        let ops = compose(&record, &PageMetrics::default(), &CharMeasure);
        assert!(section_lines(&ops, "Work Experience").is_empty());
    }
}
