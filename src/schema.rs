//! Declarative column-name tables for the personnel sheet.
//!
//! ## The naming convention, as found in the wild
//!
//! The sheet stores up to N instances of each repeated block (experience,
//! education, award) side by side in one row. Instance 1 uses the bare
//! field name; instances ≥ 2 append the instance number. Three quirks make
//! this a compatibility surface rather than a pattern we can "clean up":
//!
//! * some headers carry a trailing non-breaking space (U+00A0) *before* the
//!   number — an artefact of the form builder that produced the sheet;
//! * the education end-date columns are numbered `End Date7`…`End Date10`
//!   instead of `End Date2`…`End Date5`, because the experience block
//!   already claimed the low numbers;
//! * scalar headers like `"LinkedIn Profile\u{a0}"` end in a non-breaking
//!   space with no number at all.
//!
//! Keeping the whole convention in these tables — rather than threading it
//! through control flow — makes every irregular header auditable in one
//! place and lets the extractor stay generic.

/// How a field's column name derives its per-instance suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixRule {
    /// Instance 1 is the bare base name; instance `i ≥ 2` appends `i`.
    Numeric,
    /// Instance 1 is bare; instance `i ≥ 2` appends `offset + i - 1`.
    /// Used only by the education end-date columns (offset 6).
    NumericOffset(usize),
}

/// One field of a repeated block: a logical name, the exact base header
/// (non-breaking spaces included), the suffix rule, and whether values go
/// through the date normalizer.
#[derive(Debug, Clone, Copy)]
pub struct BlockField {
    pub name: &'static str,
    pub base: &'static str,
    pub rule: SuffixRule,
    pub is_date: bool,
}

impl BlockField {
    /// The exact column header for the given 1-based instance.
    pub fn column(&self, instance: usize) -> String {
        match (instance, self.rule) {
            (1, _) => self.base.to_string(),
            (i, SuffixRule::Numeric) => format!("{}{}", self.base, i),
            (i, SuffixRule::NumericOffset(offset)) => {
                format!("{}{}", self.base, offset + i - 1)
            }
        }
    }
}

/// A repeated-block family: its key field, instance cap, and fields.
///
/// An instance is included in the extracted sequence iff its key field is
/// non-empty after normalization.
#[derive(Debug, Clone, Copy)]
pub struct BlockSchema {
    pub label: &'static str,
    pub key: &'static str,
    pub max_instances: usize,
    pub fields: &'static [BlockField],
}

impl BlockSchema {
    /// Look up a field by logical name.
    pub fn field(&self, name: &str) -> Option<&BlockField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const fn field(name: &'static str, base: &'static str) -> BlockField {
    BlockField {
        name,
        base,
        rule: SuffixRule::Numeric,
        is_date: false,
    }
}

const fn date_field(name: &'static str, base: &'static str) -> BlockField {
    BlockField {
        name,
        base,
        rule: SuffixRule::Numeric,
        is_date: true,
    }
}

/// Work-experience block: up to 5 instances, keyed on the company name.
pub const EXPERIENCE: BlockSchema = BlockSchema {
    label: "experience",
    key: "company",
    max_instances: 5,
    fields: &[
        field("company", "Company Name"),
        field("job_title", "Job Title"),
        field("location", "Location"),
        date_field("start_date", "Start Date"),
        date_field("end_date", "End Date"),
        field("responsibility", "Main Responsibility\u{a0}"),
    ],
};

/// Education block: up to 5 instances, keyed on the education level.
///
/// The end-date columns are numbered with an offset of 6 (`End Date7`…
/// `End Date10` for instances 2…5) — preserved exactly as the sheet has it.
pub const EDUCATION: BlockSchema = BlockSchema {
    label: "education",
    key: "level",
    max_instances: 5,
    fields: &[
        field("level", "Education Level"),
        field("institution", "Institution Name"),
        field("field", "Field of study\u{a0}"),
        date_field("start_date", "Start Date\u{a0}"),
        BlockField {
            name: "end_date",
            base: "End Date",
            rule: SuffixRule::NumericOffset(6),
            is_date: true,
        },
        field("location", "Location (City, Country)"),
    ],
};

/// Award/certificate block: up to 2 instances, keyed on the award name.
pub const AWARD: BlockSchema = BlockSchema {
    label: "award",
    key: "name",
    max_instances: 2,
    fields: &[
        field("name", "Award/Certificate Name"),
        field("org", "Issuing Organization"),
        date_field("date", "Date Awarded"),
        field("description", "Award Description (optional)"),
    ],
};

/// Fixed scalar column headers (one value per person).
pub mod columns {
    pub const FIRST_NAME: &str = "First Name";
    pub const MIDDLE_NAME: &str = "Middle Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const EMAIL: &str = "Personal Email (primary)";
    pub const PHONE: &str = "Personal Phone Number";
    pub const ADDRESS: &str = "Full Address";
    pub const LINKEDIN: &str = "LinkedIn Profile\u{a0}";
    pub const WEBSITE: &str = "Website / Portfolio (Text)\u{a0}";
    pub const DATE_OF_BIRTH: &str = "Date of Birth";
    pub const GENDER: &str = "Gender";
    pub const NATIONALITY: &str = "Nationality\u{a0}";
    pub const SUMMARY: &str = "About Me / Profile Summary";
    pub const SKILLS: &str = "List of Skills and Tools";
    pub const LANGUAGES: &str = "Language";
}
