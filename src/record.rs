//! The normalized, renderer-ready representation of one person.
//!
//! A [`PersonRecord`] is built once per row, never mutated afterwards, and
//! consumed only by the renderer. Every field is a normalized string —
//! `""` means absent, and rendering treats the two identically. The three
//! block sequences preserve column-suffix order (a populated instance 3
//! after an empty instance 1 keeps its place; nothing is renumbered).

use serde::{Deserialize, Serialize};

/// One person, normalized and ready to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub website: String,
    pub dob: String,
    pub gender: String,
    pub nationality: String,
    pub summary: String,
    pub skills: String,
    pub languages: String,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub awards: Vec<Award>,
}

impl PersonRecord {
    /// Full display name: the non-empty name parts, space-joined.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One work-experience entry. Present iff the company name was non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub job_title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub responsibility: String,
}

/// One education entry. Present iff the level was non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub level: String,
    pub institution: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
}

/// One award or certificate. Present iff the name was non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    pub org: String,
    pub date: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_empty_parts() {
        let record = PersonRecord {
            first_name: "Ana".into(),
            last_name: "Duarte".into(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "Ana Duarte");

        let with_middle = PersonRecord {
            first_name: "Ana".into(),
            middle_name: "Maria".into(),
            last_name: "Duarte".into(),
            ..Default::default()
        };
        assert_eq!(with_middle.full_name(), "Ana Maria Duarte");
    }

    #[test]
    fn full_name_of_empty_record_is_empty() {
        assert_eq!(PersonRecord::default().full_name(), "");
    }
}
