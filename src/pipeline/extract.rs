//! Row → [`PersonRecord`]: scalar fields plus the three repeated-block
//! sequences.
//!
//! The extractor is generic over the block type: it walks every instance
//! slot of a [`BlockSchema`] (no early stop — a populated instance 3 is
//! kept even when instance 1 is blank) and includes an instance iff its
//! key field normalizes non-empty. The result is a sparse-but-ordered
//! sequence matching column-suffix order, never a compacted renumbering.

use crate::pipeline::input::Row;
use crate::record::{Award, Education, Experience, PersonRecord};
use crate::schema::{self, columns, BlockSchema};

/// Normalized field access for one instance of a repeated block.
///
/// Values route through the date heuristic or the plain normalizer
/// according to the schema's per-field flag; an unknown field name reads
/// as `""`, the same as any absent value.
pub struct BlockValues<'a> {
    row: &'a Row<'a>,
    schema: &'static BlockSchema,
    instance: usize,
}

impl BlockValues<'_> {
    /// The normalized value of the named schema field for this instance.
    pub fn get(&self, field: &str) -> String {
        match self.schema.field(field) {
            Some(f) => {
                let column = f.column(self.instance);
                if f.is_date {
                    self.row.date(&column)
                } else {
                    self.row.value(&column)
                }
            }
            None => String::new(),
        }
    }
}

/// Extract the populated instances of a repeated block from a row.
///
/// Iterates `1..=max_instances` in full and appends `build(&values)` for
/// every instance whose key field is non-empty. Never returns more than
/// `max_instances` entries, and every returned entry had a non-empty key.
pub fn extract_blocks<T, F>(row: &Row<'_>, schema: &'static BlockSchema, build: F) -> Vec<T>
where
    F: Fn(&BlockValues<'_>) -> T,
{
    (1..=schema.max_instances)
        .filter_map(|instance| {
            let values = BlockValues {
                row,
                schema,
                instance,
            };
            if values.get(schema.key).is_empty() {
                None
            } else {
                Some(build(&values))
            }
        })
        .collect()
}

fn experiences(row: &Row<'_>) -> Vec<Experience> {
    extract_blocks(row, &schema::EXPERIENCE, |v| Experience {
        company: v.get("company"),
        job_title: v.get("job_title"),
        location: v.get("location"),
        start_date: v.get("start_date"),
        end_date: v.get("end_date"),
        responsibility: v.get("responsibility"),
    })
}

fn education(row: &Row<'_>) -> Vec<Education> {
    extract_blocks(row, &schema::EDUCATION, |v| Education {
        level: v.get("level"),
        institution: v.get("institution"),
        field: v.get("field"),
        start_date: v.get("start_date"),
        end_date: v.get("end_date"),
        location: v.get("location"),
    })
}

fn awards(row: &Row<'_>) -> Vec<Award> {
    extract_blocks(row, &schema::AWARD, |v| Award {
        name: v.get("name"),
        org: v.get("org"),
        date: v.get("date"),
        description: v.get("description"),
    })
}

/// Build the normalized [`PersonRecord`] for one row.
///
/// Pure function of the row: fixed scalar columns through the normalizers
/// (`Date of Birth` through the date heuristic), sequences through
/// [`extract_blocks`].
pub fn build_record(row: &Row<'_>) -> PersonRecord {
    PersonRecord {
        first_name: row.value(columns::FIRST_NAME),
        middle_name: row.value(columns::MIDDLE_NAME),
        last_name: row.value(columns::LAST_NAME),
        email: row.value(columns::EMAIL),
        phone: row.value(columns::PHONE),
        address: row.value(columns::ADDRESS),
        linkedin: row.value(columns::LINKEDIN),
        website: row.value(columns::WEBSITE),
        dob: row.date(columns::DATE_OF_BIRTH),
        gender: row.value(columns::GENDER),
        nationality: row.value(columns::NATIONALITY),
        summary: row.value(columns::SUMMARY),
        skills: row.value(columns::SKILLS),
        languages: row.value(columns::LANGUAGES),
        experiences: experiences(row),
        education: education(row),
        awards: awards(row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::input::Sheet;
    use calamine::Data;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn sparse_instances_keep_their_order_and_values() {
        // Instance 1 key empty, instance 3 populated: exactly one entry,
        // carrying instance 3's other fields, never renumbered away.
        let sheet = Sheet::from_parts(
            &["Company Name", "Job Title", "Company Name3", "Job Title3"],
            vec![vec![Data::Empty, s("ignored"), s("Acme"), s("Engineer")]],
        );
        let row = sheet.rows().next().unwrap();
        let exps = experiences(&row);
        assert_eq!(exps.len(), 1);
        assert_eq!(exps[0].company, "Acme");
        assert_eq!(exps[0].job_title, "Engineer");
    }

    #[test]
    fn key_field_markers_exclude_the_instance() {
        let sheet = Sheet::from_parts(
            &["Company Name", "Company Name2"],
            vec![vec![s("nan"), s("Initech")]],
        );
        let row = sheet.rows().next().unwrap();
        let exps = experiences(&row);
        assert_eq!(exps.len(), 1);
        assert_eq!(exps[0].company, "Initech");
    }

    #[test]
    fn never_more_than_max_instances() {
        let headers = [
            "Award/Certificate Name",
            "Award/Certificate Name2",
            "Award/Certificate Name3",
        ];
        let sheet = Sheet::from_parts(
            &headers,
            vec![vec![s("First"), s("Second"), s("Third")]],
        );
        let row = sheet.rows().next().unwrap();
        let got = awards(&row);
        // The schema caps awards at 2; a stray third column is ignored.
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|a| !a.name.is_empty()));
    }

    #[test]
    fn education_reads_offset_end_date_and_nbsp_columns() {
        let sheet = Sheet::from_parts(
            &[
                "Education Level",
                "Education Level2",
                "Field of study\u{a0}2",
                "Start Date\u{a0}2",
                "End Date7",
            ],
            vec![vec![
                Data::Empty,
                s("MSc"),
                s("Data Science"),
                s("2020-09-01 00:00:00"),
                s("2022-06-30 00:00:00"),
            ]],
        );
        let row = sheet.rows().next().unwrap();
        let edus = education(&row);
        assert_eq!(edus.len(), 1);
        assert_eq!(edus[0].level, "MSc");
        assert_eq!(edus[0].field, "Data Science");
        assert_eq!(edus[0].start_date, "2020-09-01");
        assert_eq!(edus[0].end_date, "2022-06-30");
    }

    #[test]
    fn build_record_maps_scalars_and_sequences() {
        let sheet = Sheet::from_parts(
            &[
                "First Name",
                "Last Name",
                "Personal Email (primary)",
                "Date of Birth",
                "Nationality\u{a0}",
                "Company Name",
                "Job Title",
                "Education Level",
            ],
            vec![vec![
                s("Ana"),
                s("Duarte"),
                s("ana@example.com"),
                s("1990-04-02 00:00:00"),
                s("Portuguese"),
                s("Acme"),
                s("Engineer"),
                s("BSc"),
            ]],
        );
        let row = sheet.rows().next().unwrap();
        let record = build_record(&row);
        assert_eq!(record.full_name(), "Ana Duarte");
        assert_eq!(record.email, "ana@example.com");
        assert_eq!(record.dob, "1990-04-02");
        assert_eq!(record.nationality, "Portuguese");
        assert_eq!(record.experiences.len(), 1);
        assert_eq!(record.education.len(), 1);
        assert!(record.awards.is_empty());
    }
}
