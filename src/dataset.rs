//! Immutable, validated table of assessment records.
//!
//! A [`Dataset`] is built once from raw rows and never mutated afterwards.
//! All engine views read it through [`Dataset::filter`].

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// A single row as it arrives from the external table.
///
/// Every field is optional so a missing column or empty cell surfaces as a
/// schema error at construction instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "StudentID")]
    pub student_id: Option<u32>,
    #[serde(rename = "Grade")]
    pub grade: Option<u32>,
    #[serde(rename = "Subject")]
    pub subject: Option<String>,
    #[serde(rename = "Marks")]
    pub marks: Option<f64>,
}

impl RawRow {
    pub fn new(student_id: u32, grade: u32, subject: &str, marks: f64) -> Self {
        Self {
            student_id: Some(student_id),
            grade: Some(grade),
            subject: Some(subject.to_string()),
            marks: Some(marks),
        }
    }
}

/// One student/grade/subject observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "StudentID")]
    pub student_id: u32,
    #[serde(rename = "Grade")]
    pub grade: u32,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Marks")]
    pub marks: f64,
}

impl From<Record> for RawRow {
    fn from(r: Record) -> Self {
        Self {
            student_id: Some(r.student_id),
            grade: Some(r.grade),
            subject: Some(r.subject),
            marks: Some(r.marks),
        }
    }
}

/// Exact-match conjunction over any subset of the record key.
/// Unset fields match every record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordFilter<'a> {
    pub student_id: Option<u32>,
    pub grade: Option<u32>,
    pub subject: Option<&'a str>,
}

impl<'a> RecordFilter<'a> {
    pub fn student(mut self, student_id: u32) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn grade(mut self, grade: u32) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.student_id.is_none_or(|id| record.student_id == id)
            && self.grade.is_none_or(|g| record.grade == g)
            && self.subject.is_none_or(|s| record.subject == s)
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    students: Vec<u32>,
    grades: Vec<u32>,
    /// Subjects present in the data, in canonical order.
    subjects: Vec<String>,
    /// The configured closed subject list.
    catalog: Vec<String>,
    duplicate_keys: usize,
}

impl Dataset {
    /// Validates every row and builds the index sets.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Schema`] for the first row with a missing field,
    /// a subject outside the configured list, or marks outside the configured
    /// range. No partial dataset is produced.
    pub fn construct<I>(rows: I, config: &EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut records = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            records.push(validate_row(idx, row, config)?);
        }

        let students: BTreeSet<u32> = records.iter().map(|r| r.student_id).collect();
        let grades: BTreeSet<u32> = records.iter().map(|r| r.grade).collect();
        let subjects: Vec<String> = {
            let present: HashSet<&str> = records.iter().map(|r| r.subject.as_str()).collect();
            config
                .subjects
                .iter()
                .filter(|s| present.contains(s.as_str()))
                .cloned()
                .collect()
        };

        let duplicate_keys = {
            let mut seen = HashSet::new();
            records
                .iter()
                .filter(|r| !seen.insert((r.student_id, r.grade, r.subject.as_str())))
                .count()
        };
        if duplicate_keys > 0 {
            warn!(
                duplicate_keys,
                "Dataset violates key uniqueness, views will use the first match"
            );
        }

        info!(
            records = records.len(),
            students = students.len(),
            grades = grades.len(),
            subjects = subjects.len(),
            "Dataset constructed"
        );

        Ok(Self {
            records,
            students: students.into_iter().collect(),
            grades: grades.into_iter().collect(),
            subjects,
            catalog: config.subjects.clone(),
            duplicate_keys,
        })
    }

    /// Records matching `filter`, in load order.
    pub fn filter<'a>(&'a self, filter: RecordFilter<'a>) -> impl Iterator<Item = &'a Record> {
        self.records.iter().filter(move |r| filter.matches(r))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct student ids, ascending.
    pub fn students(&self) -> &[u32] {
        &self.students
    }

    /// Distinct grades, ascending.
    pub fn grades(&self) -> &[u32] {
        &self.grades
    }

    /// Distinct subjects present in the data, in canonical order.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Number of records whose key repeats an earlier record.
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }

    pub fn check_student(&self, student_id: u32) -> Result<()> {
        if self.students.binary_search(&student_id).is_ok() {
            Ok(())
        } else {
            Err(EngineError::Selection(format!("no such student: {student_id}")))
        }
    }

    pub fn check_grade(&self, grade: u32) -> Result<()> {
        if self.grades.binary_search(&grade).is_ok() {
            Ok(())
        } else {
            Err(EngineError::Selection(format!("no such grade: {grade}")))
        }
    }

    /// Accepts any subject in the configured list, including ones with no data.
    pub fn check_subject(&self, subject: &str) -> Result<()> {
        if self.catalog.iter().any(|s| s == subject) {
            Ok(())
        } else {
            Err(EngineError::Selection(format!("no such subject: {subject}")))
        }
    }
}

fn validate_row(idx: usize, row: RawRow, config: &EngineConfig) -> Result<Record> {
    let student_id = row
        .student_id
        .ok_or_else(|| EngineError::schema(idx, "missing field `StudentID`"))?;
    let grade = row
        .grade
        .ok_or_else(|| EngineError::schema(idx, "missing field `Grade`"))?;
    let subject = row
        .subject
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| EngineError::schema(idx, "missing field `Subject`"))?;
    let marks = row
        .marks
        .ok_or_else(|| EngineError::schema(idx, "missing field `Marks`"))?;

    if !config.is_known_subject(&subject) {
        return Err(EngineError::schema(
            idx,
            format!("unknown subject '{subject}'"),
        ));
    }
    if !config.marks_in_range(marks) {
        return Err(EngineError::schema(
            idx,
            format!(
                "marks {marks} outside [{}, {}]",
                config.min_marks, config.max_marks
            ),
        ));
    }

    Ok(Record {
        student_id,
        grade,
        subject,
        marks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::default().with_subjects(["Math", "Science", "English"])
    }

    fn rows() -> Vec<RawRow> {
        vec![
            RawRow::new(2, 3, "Science", 70.0),
            RawRow::new(1, 1, "Math", 50.0),
            RawRow::new(2, 1, "Math", 90.0),
            RawRow::new(1, 3, "Science", 65.0),
        ]
    }

    #[test]
    fn test_index_sets_are_sorted_and_canonical() {
        let ds = Dataset::construct(rows(), &config()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.students(), &[1, 2]);
        assert_eq!(ds.grades(), &[1, 3]);
        // canonical order, English absent from data
        assert_eq!(ds.subjects(), &["Math".to_string(), "Science".to_string()]);
        assert_eq!(ds.duplicate_keys(), 0);
    }

    #[test]
    fn test_filter_conjunction() {
        let ds = Dataset::construct(rows(), &config()).unwrap();

        assert_eq!(ds.filter(RecordFilter::default()).count(), 4);
        assert_eq!(ds.filter(RecordFilter::default().student(1)).count(), 2);
        assert_eq!(ds.filter(RecordFilter::default().grade(1)).count(), 2);

        let hits: Vec<_> = ds
            .filter(RecordFilter::default().grade(1).subject("Math"))
            .map(|r| r.student_id)
            .collect();
        // load order preserved
        assert_eq!(hits, vec![1, 2]);

        assert_eq!(
            ds.filter(RecordFilter::default().student(1).grade(3).subject("Math"))
                .count(),
            0
        );
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let mut bad = rows();
        bad[2].marks = None;

        let err = Dataset::construct(bad, &config()).unwrap_err();
        assert_eq!(err, EngineError::schema(2, "missing field `Marks`"));
    }

    #[test]
    fn test_blank_subject_is_missing() {
        let mut bad = rows();
        bad[0].subject = Some("  ".to_string());

        let err = Dataset::construct(bad, &config()).unwrap_err();
        assert!(matches!(err, EngineError::Schema { row: 0, .. }));
    }

    #[test]
    fn test_unknown_subject_is_rejected() {
        let mut bad = rows();
        bad.push(RawRow::new(1, 1, "Art", 50.0));

        let err = Dataset::construct(bad, &config()).unwrap_err();
        assert!(matches!(err, EngineError::Schema { row: 4, .. }));
    }

    #[test]
    fn test_marks_boundaries() {
        let cfg = config();
        assert!(Dataset::construct(vec![RawRow::new(1, 1, "Math", 30.0)], &cfg).is_ok());
        assert!(Dataset::construct(vec![RawRow::new(1, 1, "Math", 100.0)], &cfg).is_ok());

        for marks in [29.0, 101.0, f64::NAN] {
            let err = Dataset::construct(vec![RawRow::new(1, 1, "Math", marks)], &cfg)
                .unwrap_err();
            assert!(matches!(err, EngineError::Schema { row: 0, .. }));
        }
    }

    #[test]
    fn test_duplicates_are_counted_not_rejected() {
        let mut dup = rows();
        dup.push(RawRow::new(1, 1, "Math", 55.0));

        let ds = Dataset::construct(dup, &config()).unwrap();
        assert_eq!(ds.duplicate_keys(), 1);
    }

    #[test]
    fn test_selection_checks() {
        let ds = Dataset::construct(rows(), &config()).unwrap();

        assert!(ds.check_student(2).is_ok());
        assert!(matches!(ds.check_student(99), Err(EngineError::Selection(_))));
        assert!(ds.check_grade(3).is_ok());
        assert!(matches!(ds.check_grade(2), Err(EngineError::Selection(_))));
        // configured but absent from data is still a valid selection
        assert!(ds.check_subject("English").is_ok());
        assert!(matches!(ds.check_subject("Art"), Err(EngineError::Selection(_))));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::construct(Vec::new(), &config()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.students().is_empty());
        assert!(ds.subjects().is_empty());
    }
}
